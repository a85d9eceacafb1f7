//! Menu states

use serde::{Deserialize, Serialize};

/// A named point in the conversation.
///
/// The current state determines which inputs are meaningful; see
/// [`crate::menu::engine::transition`] for the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    /// Top-level menu; entry point for every new session.
    Main,
    DesignGraphic,
    SocialMedia,
    WebDevelopment,
    Printing,
    Agent,
    PriceList,
    Quote,
    /// First wizard question (hair type).
    RoutineType,
    /// Second wizard question (main concern).
    RoutineConcern,
    /// Wizard result; the follow-up reminder is armed on entry.
    RoutineRecommendation,
    HairTreatments,
    HairProducts,
    /// Terminal state; the session is removed as soon as it is reached.
    Closed,
}

impl MenuState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuState::Main => "main",
            MenuState::DesignGraphic => "design_graphic",
            MenuState::SocialMedia => "social_media",
            MenuState::WebDevelopment => "web_development",
            MenuState::Printing => "printing",
            MenuState::Agent => "agent",
            MenuState::PriceList => "price_list",
            MenuState::Quote => "quote",
            MenuState::RoutineType => "routine_type",
            MenuState::RoutineConcern => "routine_concern",
            MenuState::RoutineRecommendation => "routine_recommendation",
            MenuState::HairTreatments => "hair_treatments",
            MenuState::HairProducts => "hair_products",
            MenuState::Closed => "closed",
        }
    }

    /// Whether this state ends the conversation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MenuState::Closed)
    }
}

impl std::fmt::Display for MenuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(MenuState::Main.to_string(), "main");
        assert_eq!(MenuState::RoutineType.to_string(), "routine_type");
    }

    #[test]
    fn test_terminal() {
        assert!(MenuState::Closed.is_terminal());
        assert!(!MenuState::Main.is_terminal());
        assert!(!MenuState::Quote.is_terminal());
    }
}
