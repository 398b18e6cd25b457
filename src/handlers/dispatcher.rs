//! Turn dispatcher
//!
//! Routes are tried in registration order and the first match runs. The
//! fallback route is kept apart from the ordered list and only runs when
//! nothing else matched.

use tracing::debug;

use super::classifier::*;
use super::common::{
    error_response, handle_cancel_and_stop, handle_help, handle_launch, handle_session_ended,
    handle_unhandled,
};
use super::context::TurnContext;
use super::shopping::{
    handle_no, handle_offer, handle_refund, handle_session_resumed, handle_yes,
};
use crate::models::response::{ResponseBuilder, ShoppingAction};
use crate::state::attributes::SkillState;
use crate::utils::errors::Result;
use crate::utils::logging::log_turn;

/// A (predicate, action) pair of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Launch,
    CancelAndStop,
    SessionResumed,
    BuyPrompt,
    CartPrompt,
    Yes,
    No,
    Help,
    Refund,
    SessionEnded,
    Unhandled,
}

impl Route {
    /// Whether this route handles `intent` in `state`
    pub fn matches(self, intent: &str, state: &SkillState) -> bool {
        match self {
            Route::Launch => intent == LAUNCH_REQUEST,
            Route::CancelAndStop => intent == CANCEL_INTENT || intent == STOP_INTENT,
            Route::SessionResumed => intent == SESSION_RESUMED_REQUEST,
            Route::BuyPrompt => intent == BUY_ITEM_INTENT,
            Route::CartPrompt => intent == ADD_TO_CART_INTENT,
            // Without a pending offer there is nothing to answer
            Route::Yes => intent == YES_INTENT && !state.is_menu(),
            Route::No => intent == NO_INTENT && !state.is_menu(),
            Route::Help => intent == HELP_INTENT,
            Route::Refund => intent == REFUND_INTENT,
            Route::SessionEnded => intent == SESSION_ENDED_REQUEST,
            Route::Unhandled => true,
        }
    }

    pub async fn run(self, ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
        match self {
            Route::Launch => handle_launch(ctx).await,
            Route::CancelAndStop => handle_cancel_and_stop(ctx).await,
            Route::SessionResumed => handle_session_resumed(ctx).await,
            Route::BuyPrompt => handle_offer(ctx, ShoppingAction::Buy).await,
            Route::CartPrompt => handle_offer(ctx, ShoppingAction::AddToCart).await,
            Route::Yes => handle_yes(ctx).await,
            Route::No => handle_no(ctx).await,
            Route::Help => handle_help(ctx).await,
            Route::Refund => handle_refund(ctx).await,
            Route::SessionEnded => handle_session_ended(ctx).await,
            Route::Unhandled => handle_unhandled(ctx).await,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Launch => "launch",
            Route::CancelAndStop => "cancel_and_stop",
            Route::SessionResumed => "session_resumed",
            Route::BuyPrompt => "buy_prompt",
            Route::CartPrompt => "cart_prompt",
            Route::Yes => "yes",
            Route::No => "no",
            Route::Help => "help",
            Route::Refund => "refund",
            Route::SessionEnded => "session_ended",
            Route::Unhandled => "unhandled",
        }
    }
}

/// Ordered routes plus the distinguished fallback
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Vec<Route>,
    fallback: Route,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(
            vec![
                Route::Launch,
                Route::CancelAndStop,
                Route::SessionResumed,
                Route::BuyPrompt,
                Route::CartPrompt,
                Route::Yes,
                Route::No,
                Route::Help,
                Route::Refund,
                Route::SessionEnded,
            ],
            Route::Unhandled,
        )
    }
}

impl Dispatcher {
    pub fn new(routes: Vec<Route>, fallback: Route) -> Self {
        Self { routes, fallback }
    }

    /// First route matching the turn, else the fallback
    pub fn select(&self, intent: &str, state: &SkillState) -> Route {
        self.routes
            .iter()
            .copied()
            .find(|route| route.matches(intent, state))
            .unwrap_or(self.fallback)
    }

    /// Run the matching route. A failed route is answered with the generic
    /// apology; on failure the attributes are rolled back to the turn start.
    pub async fn dispatch(&self, ctx: &mut TurnContext<'_>) -> ResponseBuilder {
        let route = self.select(ctx.intent, &ctx.attributes.state);
        let user_id = ctx.envelope.user_id().unwrap_or("unknown");
        log_turn(user_id, ctx.intent, ctx.attributes.state.tag(), route.name());

        let snapshot = ctx.attributes.clone();
        match route.run(ctx).await {
            Ok(response) => response,
            Err(err) => {
                debug!(route = route.name(), "Route failed, restoring attributes");
                ctx.attributes = snapshot;
                error_response(&ctx.translator, &err)
            }
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::offer_for;

    fn cart() -> SkillState {
        SkillState::Cart(offer_for("yoga-mat", None).unwrap())
    }

    #[test]
    fn test_registration_order() {
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.routes().first(), Some(&Route::Launch));
        assert_eq!(dispatcher.routes().last(), Some(&Route::SessionEnded));
        assert!(!dispatcher.routes().contains(&Route::Unhandled));
    }

    #[test]
    fn test_select_by_intent() {
        let dispatcher = Dispatcher::default();
        let menu = SkillState::Menu;
        assert_eq!(dispatcher.select(LAUNCH_REQUEST, &menu), Route::Launch);
        assert_eq!(dispatcher.select(STOP_INTENT, &cart()), Route::CancelAndStop);
        assert_eq!(dispatcher.select(CANCEL_INTENT, &menu), Route::CancelAndStop);
        assert_eq!(dispatcher.select(ADD_TO_CART_INTENT, &menu), Route::CartPrompt);
        assert_eq!(dispatcher.select(BUY_ITEM_INTENT, &cart()), Route::BuyPrompt);
        assert_eq!(dispatcher.select(REFUND_INTENT, &menu), Route::Refund);
    }

    #[test]
    fn test_yes_and_no_need_pending_offer() {
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.select(YES_INTENT, &cart()), Route::Yes);
        assert_eq!(dispatcher.select(NO_INTENT, &cart()), Route::No);
        assert_eq!(dispatcher.select(YES_INTENT, &SkillState::Menu), Route::Unhandled);
        assert_eq!(dispatcher.select(NO_INTENT, &SkillState::Menu), Route::Unhandled);
    }

    #[test]
    fn test_unknown_intent_falls_back() {
        let dispatcher = Dispatcher::default();
        assert_eq!(
            dispatcher.select("AMAZON.FallbackIntent", &SkillState::Menu),
            Route::Unhandled
        );
        assert_eq!(dispatcher.select("IntentRequest", &cart()), Route::Unhandled);
    }
}
