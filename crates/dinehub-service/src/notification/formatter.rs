//! Notification titles and labels per record type.

use dinehub_entity::{Contact, Feedback, NotificationItem, NotificationKind, Order, TableReservation};

/// Maps source records to feed items.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// `Reservation: {customer_name}`, labelled with the reservation status.
    pub fn reservation(reservation: &TableReservation) -> NotificationItem {
        NotificationItem {
            kind: NotificationKind::Reservation,
            source_id: reservation.id.clone(),
            title: format!("Reservation: {}", reservation.customer_name),
            timestamp: Some(reservation.created_at),
            status_label: reservation.status.label().to_string(),
        }
    }

    /// `Order {order_code}: Table {table_number}`, labelled with the order status.
    pub fn order(order: &Order) -> NotificationItem {
        NotificationItem {
            kind: NotificationKind::Order,
            source_id: order.id.clone(),
            title: format!("Order {}: Table {}", order.order_code, order.table_number),
            timestamp: Some(order.created_at),
            status_label: order.status.label().to_string(),
        }
    }

    /// `Contact: {name}`, labelled `Read` or `Unread`.
    pub fn contact(contact: &Contact) -> NotificationItem {
        NotificationItem {
            kind: NotificationKind::Contact,
            source_id: contact.id.clone(),
            title: format!("Contact: {}", contact.name),
            timestamp: contact.created_at,
            status_label: contact.status.label().to_string(),
        }
    }

    /// `Feedback: {customer_name} ({rating}/5)`, labelled `Hidden` or `Visible`.
    pub fn feedback(feedback: &Feedback) -> NotificationItem {
        NotificationItem {
            kind: NotificationKind::Feedback,
            source_id: feedback.id.clone(),
            title: format!("Feedback: {} ({}/5)", feedback.customer_name, feedback.rating),
            timestamp: feedback.created_at,
            status_label: feedback.visibility_label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dinehub_entity::{ContactStatus, OrderStatus, ReservationStatus};

    use crate::fixtures;

    #[test]
    fn test_reservation_title() {
        let mut reservation =
            fixtures::reservation("Nguyễn Văn Anh", "0988994799", ReservationStatus::Confirmed, Utc::now());
        reservation.id = "r-1".to_string();

        let item = NotificationFormatter::reservation(&reservation);
        assert_eq!(item.title, "Reservation: Nguyễn Văn Anh");
        assert_eq!(item.status_label, "Confirmed");
        assert_eq!(item.source_id, "r-1");
        assert_eq!(item.kind, NotificationKind::Reservation);
    }

    #[test]
    fn test_order_title() {
        let mut order = fixtures::order(OrderStatus::Preparing, Utc::now());
        order.order_code = "A-042".to_string();
        order.table_number = 7;

        let item = NotificationFormatter::order(&order);
        assert_eq!(item.title, "Order A-042: Table 7");
        assert_eq!(item.status_label, "Preparing");
    }

    #[test]
    fn test_contact_labels() {
        let mut contact = fixtures::contact("Hà", None);
        assert_eq!(NotificationFormatter::contact(&contact).status_label, "Unread");

        contact.status = ContactStatus::Read;
        let item = NotificationFormatter::contact(&contact);
        assert_eq!(item.title, "Contact: Hà");
        assert_eq!(item.status_label, "Read");
        assert!(item.timestamp.is_none());
    }

    #[test]
    fn test_feedback_labels() {
        let mut feedback = fixtures::feedback("Quang", 4, Some(Utc::now()));
        let item = NotificationFormatter::feedback(&feedback);
        assert_eq!(item.title, "Feedback: Quang (4/5)");
        assert_eq!(item.status_label, "Visible");

        feedback.hidden = true;
        assert_eq!(NotificationFormatter::feedback(&feedback).status_label, "Hidden");
    }
}
