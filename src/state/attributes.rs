//! Session attribute record
//!
//! The flat attribute map stored by the platform and by the durable store is
//! decoded into [`SessionAttributes`], whose [`SkillState`] carries the
//! offered item. An item therefore exists exactly while an offer is pending.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::catalog::OfferedItem;
use crate::models::response::ShoppingAction;
use crate::utils::errors::{Result, SkillError};

/// Attribute key holding the state tag
pub const STATE_KEY: &str = "SKILL_STATE";
/// Attribute key holding the first-run flag
pub const FIRST_RUN_KEY: &str = "NEW_USER";
/// Attribute key holding the offered item
pub const ITEM_KEY: &str = "SHOPPING_ITEM";

const MENU_MODE: &str = "_MENU_MODE";
const CART_MODE: &str = "_CART_MODE";
const BUY_MODE: &str = "_BUY_MODE";

/// Where the conversation stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SkillState {
    #[default]
    Menu,
    /// Awaiting yes/no on an add-to-cart offer
    Cart(OfferedItem),
    /// Awaiting yes/no on a purchase offer
    Buy(OfferedItem),
}

impl SkillState {
    /// Stored tag for this state
    pub fn tag(&self) -> &'static str {
        match self {
            SkillState::Menu => MENU_MODE,
            SkillState::Cart(_) => CART_MODE,
            SkillState::Buy(_) => BUY_MODE,
        }
    }

    pub fn item(&self) -> Option<&OfferedItem> {
        match self {
            SkillState::Menu => None,
            SkillState::Cart(item) | SkillState::Buy(item) => Some(item),
        }
    }

    /// The shopping action a pending offer leads to
    pub fn pending_action(&self) -> Option<ShoppingAction> {
        match self {
            SkillState::Menu => None,
            SkillState::Cart(_) => Some(ShoppingAction::AddToCart),
            SkillState::Buy(_) => Some(ShoppingAction::Buy),
        }
    }

    pub fn is_menu(&self) -> bool {
        matches!(self, SkillState::Menu)
    }
}

impl std::fmt::Display for SkillState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-user attribute record owned by one turn at a time
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAttributes {
    pub state: SkillState,
    pub first_run: bool,
    /// Keys this skill does not interpret, kept verbatim
    extra: Map<String, Value>,
}

/// Flat wire shape of the attribute map
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawAttributes {
    #[serde(rename = "SKILL_STATE", default, skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(rename = "NEW_USER", default, skip_serializing_if = "Option::is_none")]
    first_run: Option<bool>,
    #[serde(rename = "SHOPPING_ITEM", default, skip_serializing_if = "Option::is_none")]
    item: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Default for SessionAttributes {
    fn default() -> Self {
        Self::new_user()
    }
}

impl SessionAttributes {
    /// Attributes for a user never saved before
    pub fn new_user() -> Self {
        Self {
            state: SkillState::Menu,
            first_run: true,
            extra: Map::new(),
        }
    }

    /// Decode an attribute map. A missing first-run flag means the user has
    /// never been saved.
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        let raw: RawAttributes = serde_json::from_value(Value::Object(map))?;

        let item = raw.item.and_then(|value| {
            serde_json::from_value::<OfferedItem>(value)
                .map_err(|e| warn!(error = %e, "Discarding unreadable shopping item"))
                .ok()
        });

        let state = match (raw.state.as_deref(), item) {
            (Some(CART_MODE), Some(item)) => SkillState::Cart(item),
            (Some(BUY_MODE), Some(item)) => SkillState::Buy(item),
            (Some(CART_MODE) | Some(BUY_MODE), None) => {
                warn!("Offer state without an item, returning to menu");
                SkillState::Menu
            }
            (Some(MENU_MODE) | None, _) => SkillState::Menu,
            (Some(other), _) => {
                warn!(state = other, "Unknown skill state, returning to menu");
                SkillState::Menu
            }
        };

        Ok(Self {
            state,
            first_run: raw.first_run.unwrap_or(true),
            extra: raw.extra,
        })
    }

    /// Encode to the flat attribute map
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        let raw = RawAttributes {
            state: Some(self.state.tag().to_string()),
            first_run: Some(self.first_run),
            item: self.state.item().map(serde_json::to_value).transpose()?,
            extra: self.extra.clone(),
        };

        match serde_json::to_value(raw)? {
            Value::Object(map) => Ok(map),
            other => Err(SkillError::InvalidRequest(format!(
                "Attributes encoded to a non-object value: {}",
                other
            ))),
        }
    }

    /// Record a pending offer
    pub fn offer(&mut self, action: ShoppingAction, item: OfferedItem) {
        self.state = match action {
            ShoppingAction::AddToCart => SkillState::Cart(item),
            ShoppingAction::Buy => SkillState::Buy(item),
        };
    }

    /// Resolve any pending offer and return to the menu
    pub fn return_to_menu(&mut self) -> SkillState {
        std::mem::take(&mut self.state)
    }

    /// Mark the user as saved at least once
    pub fn mark_returning(&mut self) {
        self.first_run = false;
    }

    /// Look up an uninterpreted attribute
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
