//! Deposit gate
//!
//! Pure decision interposed between a transition request and the status
//! machine. Check-in pauses for a deposit-capture step when the room holds
//! no active deposit; checkout pauses for a deposit-return step when it
//! does. Declining the step commits nothing: the gate is evaluated before
//! any write.

use shared::models::BookingStatus;

/// Gate decision for a requested transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// No deposit step needed, transition proceeds directly
    Proceed,
    /// BO→CI on a room without an active deposit: capture money or an
    /// identity document first
    CaptureRequired,
    /// CI→CO on a room with an active deposit: return/review it first
    ReturnRequired,
}

/// Evaluate the gate for a `current → target` transition
pub fn evaluate(
    current: BookingStatus,
    target: BookingStatus,
    has_active_deposit: bool,
) -> GateDecision {
    match (current, target) {
        (BookingStatus::Bo, BookingStatus::Ci) if !has_active_deposit => {
            GateDecision::CaptureRequired
        }
        (BookingStatus::Ci, BookingStatus::Co) if has_active_deposit => {
            GateDecision::ReturnRequired
        }
        _ => GateDecision::Proceed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::BookingStatus::*;

    #[test]
    fn test_check_in_without_deposit_prompts_capture() {
        assert_eq!(evaluate(Bo, Ci, false), GateDecision::CaptureRequired);
    }

    #[test]
    fn test_check_in_with_deposit_never_prompts() {
        // The existing deposit is treated as still covering the stay
        assert_eq!(evaluate(Bo, Ci, true), GateDecision::Proceed);
    }

    #[test]
    fn test_checkout_with_deposit_prompts_return() {
        assert_eq!(evaluate(Ci, Co, true), GateDecision::ReturnRequired);
    }

    #[test]
    fn test_checkout_without_deposit_never_prompts() {
        assert_eq!(evaluate(Ci, Co, false), GateDecision::Proceed);
    }

    #[test]
    fn test_cancel_never_gated() {
        assert_eq!(evaluate(Bo, Batal, true), GateDecision::Proceed);
        assert_eq!(evaluate(Ci, Batal, true), GateDecision::Proceed);
    }
}
