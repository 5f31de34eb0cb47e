use store::{OrderStatus, OrderWithItems, Store};

use crate::error::AppError;

/// What the staff listing is narrowed to. `all` is the sentinel for no
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(Self::All);
        }
        OrderStatus::parse(s).map(Self::Only)
    }

    fn status(self) -> Option<OrderStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

/// Orders newest-first with their items, for the staff view.
pub async fn list_orders(
    store: &Store,
    filter: StatusFilter,
) -> Result<Vec<OrderWithItems>, AppError> {
    store
        .orders_with_items(filter.status())
        .await
        .map_err(AppError::RemoteQuery)
}

/// Sets the order's status unconditionally. Any value from any value; no
/// transition graph is enforced. The caller re-fetches the listing on
/// success.
pub async fn set_status(
    store: &Store,
    order_id: &str,
    status: OrderStatus,
) -> Result<(), AppError> {
    store
        .update_order_status(order_id, status)
        .await
        .map_err(AppError::RemoteQuery)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_means_no_filter() {
        assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
        assert_eq!(StatusFilter::All.status(), None);
    }

    #[test]
    fn status_values_map_to_a_filter() {
        let filter = StatusFilter::parse("pending").unwrap();
        assert_eq!(filter, StatusFilter::Only(OrderStatus::Pending));
        assert_eq!(filter.status(), Some(OrderStatus::Pending));
    }

    #[test]
    fn junk_is_rejected() {
        assert_eq!(StatusFilter::parse("everything"), None);
        assert_eq!(StatusFilter::parse(""), None);
    }
}
