//! Transition engine
//!
//! Pure mapping from (current state, raw input) to (reply, next state). The
//! engine may record wizard answers into the session flags and may request
//! that the follow-up reminder be armed, but it never sends anything itself.

use crate::menu::catalog;
use crate::menu::MenuState;
use crate::session::SessionFlags;

/// Greeting phrases checked case-insensitively as substrings, so a greeting
/// anywhere in the message resets the conversation. This can false-positive
/// on messages that merely contain a greeting word; that matches the
/// product's behavior and is left as is.
const GREETINGS: [&str; 7] = [
    "hola",
    "buenos dias",
    "buen dia",
    "buenas tardes",
    "buenas noches",
    "hi",
    "hello",
];

/// Outcome of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Reply to send back to the user.
    pub reply: &'static str,
    /// State the session moves to.
    pub next: MenuState,
    /// Whether the caller should arm the deferred follow-up reminder.
    pub arm_reminder: bool,
}

impl Transition {
    fn to(reply: &'static str, next: MenuState) -> Self {
        Self {
            reply,
            next,
            arm_reminder: false,
        }
    }
}

fn is_greeting(input: &str) -> bool {
    let lowered = input.to_lowercase();
    GREETINGS.iter().any(|greeting| lowered.contains(greeting))
}

/// Compute the reply and next state for one inbound message.
///
/// Menu digits are compared by exact string equality ("01" never matches
/// "1"). Selecting "0" returns to the main menu from every non-terminal
/// state, after state-specific matching has failed; from the main menu
/// itself, "0" closes the session.
pub fn transition(state: MenuState, input: &str, flags: &mut SessionFlags) -> Transition {
    let input = input.trim();

    // The greeting override wins over all state-specific handling, including
    // mid-wizard states.
    if is_greeting(input) {
        return Transition::to(catalog::WELCOME, MenuState::Main);
    }

    match state {
        MenuState::Main => main_menu(input),

        MenuState::RoutineType => match input {
            "1" | "2" | "3" | "4" => {
                flags.hair_type = Some(input.to_string());
                Transition::to(catalog::ROUTINE_CONCERN, MenuState::RoutineConcern)
            }
            "0" => Transition::to(catalog::WELCOME, MenuState::Main),
            _ => Transition::to(catalog::DEFAULT, state),
        },

        MenuState::RoutineConcern => match input {
            "1" | "2" | "3" | "4" | "5" => {
                flags.concern = Some(input.to_string());
                Transition {
                    reply: catalog::ROUTINE_RECOMMENDATION,
                    next: MenuState::RoutineRecommendation,
                    arm_reminder: true,
                }
            }
            "0" => Transition::to(catalog::WELCOME, MenuState::Main),
            _ => Transition::to(catalog::DEFAULT, state),
        },

        MenuState::HairTreatments => match input {
            "1" | "2" | "3" => Transition::to(catalog::TREATMENT_FOLLOW_UP, state),
            "0" => Transition::to(catalog::WELCOME, MenuState::Main),
            _ => Transition::to(catalog::DEFAULT, state),
        },

        MenuState::HairProducts => match input {
            "1" | "2" | "3" => Transition::to(catalog::PRODUCT_FOLLOW_UP, state),
            "0" => Transition::to(catalog::WELCOME, MenuState::Main),
            _ => Transition::to(catalog::DEFAULT, state),
        },

        // Absorbing submenus: any selection is acknowledged and the state is
        // kept, except "0" which exits back to the main menu.
        MenuState::DesignGraphic
        | MenuState::SocialMedia
        | MenuState::WebDevelopment
        | MenuState::Printing
        | MenuState::Agent
        | MenuState::PriceList
        | MenuState::Quote => match input {
            "0" => Transition::to(catalog::WELCOME, MenuState::Main),
            _ => Transition::to(catalog::ADVISOR_FOLLOW_UP, state),
        },

        MenuState::RoutineRecommendation => match input {
            "0" => Transition::to(catalog::WELCOME, MenuState::Main),
            _ => Transition::to(catalog::DEFAULT, state),
        },

        // Closed sessions are removed on arrival, so this is only reachable
        // if a caller feeds a stale state back in.
        MenuState::Closed => Transition::to(catalog::DEFAULT, state),
    }
}

fn main_menu(input: &str) -> Transition {
    match input {
        "1" => Transition::to(catalog::DESIGN_GRAPHIC, MenuState::DesignGraphic),
        "2" => Transition::to(catalog::SOCIAL_MEDIA, MenuState::SocialMedia),
        "3" => Transition::to(catalog::WEB_DEVELOPMENT, MenuState::WebDevelopment),
        "4" => Transition::to(catalog::PRINTING, MenuState::Printing),
        "5" => Transition::to(catalog::AGENT, MenuState::Agent),
        "6" => Transition::to(catalog::PRICE_LIST, MenuState::PriceList),
        "7" => Transition::to(catalog::QUOTE, MenuState::Quote),
        "8" => Transition::to(catalog::ROUTINE_TYPE, MenuState::RoutineType),
        "9" => Transition::to(catalog::HAIR_TREATMENTS, MenuState::HairTreatments),
        "10" => Transition::to(catalog::HAIR_PRODUCTS, MenuState::HairProducts),
        "0" => Transition::to(catalog::CLOSING, MenuState::Closed),
        _ => Transition::to(catalog::DEFAULT, MenuState::Main),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: MenuState, input: &str) -> Transition {
        let mut flags = SessionFlags::default();
        transition(state, input, &mut flags)
    }

    #[test]
    fn test_greeting_from_main() {
        let t = run(MenuState::Main, "Hola");
        assert_eq!(t.reply, catalog::WELCOME);
        assert_eq!(t.next, MenuState::Main);
    }

    #[test]
    fn test_greeting_overrides_any_state() {
        for state in [
            MenuState::DesignGraphic,
            MenuState::RoutineType,
            MenuState::RoutineConcern,
            MenuState::HairProducts,
            MenuState::Quote,
        ] {
            let t = run(state, "buenas tardes!");
            assert_eq!(t.next, MenuState::Main, "state {state} should reset");
            assert_eq!(t.reply, catalog::WELCOME);
        }
    }

    #[test]
    fn test_greeting_is_substring_match() {
        // Accepted limitation: any message containing a greeting word resets.
        let t = run(MenuState::RoutineConcern, "pues HOLA, quiero el 2");
        assert_eq!(t.next, MenuState::Main);
    }

    #[test]
    fn test_main_menu_selections() {
        let cases = [
            ("1", catalog::DESIGN_GRAPHIC, MenuState::DesignGraphic),
            ("2", catalog::SOCIAL_MEDIA, MenuState::SocialMedia),
            ("3", catalog::WEB_DEVELOPMENT, MenuState::WebDevelopment),
            ("4", catalog::PRINTING, MenuState::Printing),
            ("5", catalog::AGENT, MenuState::Agent),
            ("6", catalog::PRICE_LIST, MenuState::PriceList),
            ("7", catalog::QUOTE, MenuState::Quote),
            ("8", catalog::ROUTINE_TYPE, MenuState::RoutineType),
            ("9", catalog::HAIR_TREATMENTS, MenuState::HairTreatments),
            ("10", catalog::HAIR_PRODUCTS, MenuState::HairProducts),
        ];
        for (input, reply, next) in cases {
            let t = run(MenuState::Main, input);
            assert_eq!(t.reply, reply);
            assert_eq!(t.next, next);
            assert!(!t.arm_reminder);
        }
    }

    #[test]
    fn test_main_menu_zero_closes() {
        let t = run(MenuState::Main, "0");
        assert_eq!(t.reply, catalog::CLOSING);
        assert_eq!(t.next, MenuState::Closed);
    }

    #[test]
    fn test_digit_match_is_exact_string_equality() {
        let t = run(MenuState::Main, "01");
        assert_eq!(t.reply, catalog::DEFAULT);
        assert_eq!(t.next, MenuState::Main);

        let t = run(MenuState::Main, "1 0");
        assert_eq!(t.reply, catalog::DEFAULT);
    }

    #[test]
    fn test_input_is_trimmed() {
        let t = run(MenuState::Main, "  1  ");
        assert_eq!(t.next, MenuState::DesignGraphic);
    }

    #[test]
    fn test_unknown_input_keeps_state() {
        let t = run(MenuState::Main, "banana");
        assert_eq!(t.reply, catalog::DEFAULT);
        assert_eq!(t.next, MenuState::Main);
    }

    #[test]
    fn test_wizard_records_answers() {
        let mut flags = SessionFlags::default();

        let t = transition(MenuState::RoutineType, "3", &mut flags);
        assert_eq!(t.next, MenuState::RoutineConcern);
        assert_eq!(flags.hair_type.as_deref(), Some("3"));
        assert!(!t.arm_reminder);

        let t = transition(MenuState::RoutineConcern, "2", &mut flags);
        assert_eq!(t.next, MenuState::RoutineRecommendation);
        assert_eq!(t.reply, catalog::ROUTINE_RECOMMENDATION);
        assert_eq!(flags.concern.as_deref(), Some("2"));
        assert!(t.arm_reminder);
    }

    #[test]
    fn test_wizard_rejects_out_of_range_digits() {
        let mut flags = SessionFlags::default();

        let t = transition(MenuState::RoutineType, "5", &mut flags);
        assert_eq!(t.reply, catalog::DEFAULT);
        assert_eq!(t.next, MenuState::RoutineType);
        assert!(flags.hair_type.is_none());

        let t = transition(MenuState::RoutineConcern, "6", &mut flags);
        assert_eq!(t.reply, catalog::DEFAULT);
        assert_eq!(t.next, MenuState::RoutineConcern);
        assert!(flags.concern.is_none());
    }

    #[test]
    fn test_absorbing_submenu_acknowledges_everything() {
        let t = run(MenuState::DesignGraphic, "9");
        assert_eq!(t.reply, catalog::ADVISOR_FOLLOW_UP);
        assert_eq!(t.next, MenuState::DesignGraphic);

        let t = run(MenuState::Agent, "cualquier cosa");
        assert_eq!(t.reply, catalog::ADVISOR_FOLLOW_UP);
        assert_eq!(t.next, MenuState::Agent);
    }

    #[test]
    fn test_hair_menus_acknowledge_known_digits_only() {
        let t = run(MenuState::HairTreatments, "2");
        assert_eq!(t.reply, catalog::TREATMENT_FOLLOW_UP);
        assert_eq!(t.next, MenuState::HairTreatments);

        let t = run(MenuState::HairTreatments, "4");
        assert_eq!(t.reply, catalog::DEFAULT);

        let t = run(MenuState::HairProducts, "1");
        assert_eq!(t.reply, catalog::PRODUCT_FOLLOW_UP);
        assert_eq!(t.next, MenuState::HairProducts);
    }

    #[test]
    fn test_zero_returns_to_main_from_every_non_terminal_state() {
        for state in [
            MenuState::DesignGraphic,
            MenuState::SocialMedia,
            MenuState::WebDevelopment,
            MenuState::Printing,
            MenuState::Agent,
            MenuState::PriceList,
            MenuState::Quote,
            MenuState::RoutineType,
            MenuState::RoutineConcern,
            MenuState::RoutineRecommendation,
            MenuState::HairTreatments,
            MenuState::HairProducts,
        ] {
            let t = run(state, "0");
            assert_eq!(t.next, MenuState::Main, "0 from {state} should return to main");
            assert_eq!(t.reply, catalog::WELCOME);
        }
    }
}
