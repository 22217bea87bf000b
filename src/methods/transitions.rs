use crate::model::{BookingStatus, InventoryStatus, QuoteStatus};

// Explicit allowed-transition tables. Status writes that are not listed
// here are rejected with a 409 before anything touches the database.

pub fn booking_transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    if from == to {
        return true;
    }
    match (from, to) {
        (Pending, Confirmed) => true,
        (Confirmed, Delivered) => true,
        (Delivered, PickedUp) => true,
        (PickedUp, Completed) => true,
        // Cancellation from any non-terminal state
        (Pending | Confirmed | Delivered | PickedUp, Cancelled) => true,
        _ => false,
    }
}

pub fn inventory_transition_allowed(from: InventoryStatus, to: InventoryStatus) -> bool {
    use InventoryStatus::*;
    if from == to {
        return true;
    }
    match (from, to) {
        (Available, Rented) | (Rented, Available) => true,
        (Available | Rented, Maintenance) => true,
        (Maintenance, Available) => true,
        // Retirement is one-way
        (Available | Rented | Maintenance, Retired) => true,
        _ => false,
    }
}

pub fn quote_transition_allowed(from: QuoteStatus, to: QuoteStatus) -> bool {
    use QuoteStatus::*;
    if from == to {
        return true;
    }
    match (from, to) {
        (Pending, Quoted) => true,
        (Quoted, Accepted) | (Quoted, Rejected) => true,
        (Accepted, Completed) => true,
        (Pending | Quoted, Rejected) => true,
        _ => false,
    }
}

pub fn booking_status_name(status: BookingStatus) -> &'static str {
    use BookingStatus::*;
    match status {
        Pending => "pending",
        Confirmed => "confirmed",
        Delivered => "delivered",
        PickedUp => "picked_up",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

pub fn inventory_status_name(status: InventoryStatus) -> &'static str {
    use InventoryStatus::*;
    match status {
        Available => "available",
        Rented => "rented",
        Maintenance => "maintenance",
        Retired => "retired",
    }
}

pub fn quote_status_name(status: QuoteStatus) -> &'static str {
    use QuoteStatus::*;
    match status {
        Pending => "pending",
        Quoted => "quoted",
        Accepted => "accepted",
        Rejected => "rejected",
        Completed => "completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_happy_path_is_legal() {
        use BookingStatus::*;
        let path = [Pending, Confirmed, Delivered, PickedUp, Completed];
        for pair in path.windows(2) {
            assert!(booking_transition_allowed(pair[0], pair[1]));
        }
    }

    #[test]
    fn booking_cannot_skip_or_reverse() {
        use BookingStatus::*;
        assert!(!booking_transition_allowed(Pending, Delivered));
        assert!(!booking_transition_allowed(Confirmed, PickedUp));
        assert!(!booking_transition_allowed(PickedUp, Delivered));
        assert!(!booking_transition_allowed(Completed, Pending));
    }

    #[test]
    fn cancel_from_any_non_terminal_state_only() {
        use BookingStatus::*;
        for from in [Pending, Confirmed, Delivered, PickedUp] {
            assert!(booking_transition_allowed(from, Cancelled));
        }
        assert!(!booking_transition_allowed(Completed, Cancelled));
        assert!(!booking_transition_allowed(Cancelled, Confirmed));
    }

    #[test]
    fn same_status_write_is_a_no_op() {
        assert!(booking_transition_allowed(
            BookingStatus::Confirmed,
            BookingStatus::Confirmed
        ));
        assert!(inventory_transition_allowed(
            InventoryStatus::Rented,
            InventoryStatus::Rented
        ));
    }

    #[test]
    fn retired_units_stay_retired() {
        use InventoryStatus::*;
        for to in [Available, Rented, Maintenance] {
            assert!(!inventory_transition_allowed(Retired, to));
        }
        assert!(inventory_transition_allowed(Rented, Retired));
    }

    #[test]
    fn quote_lifecycle() {
        use QuoteStatus::*;
        assert!(quote_transition_allowed(Pending, Quoted));
        assert!(quote_transition_allowed(Quoted, Accepted));
        assert!(quote_transition_allowed(Accepted, Completed));
        assert!(quote_transition_allowed(Pending, Rejected));
        assert!(!quote_transition_allowed(Rejected, Accepted));
        assert!(!quote_transition_allowed(Pending, Completed));
    }
}
