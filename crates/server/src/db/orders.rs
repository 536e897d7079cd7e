//! Order repository.

use std::sync::Arc;

use serde_json::Value;

use paper_cart_core::OrderId;

use super::{RepositoryError, locale_date, locale_time, next_id};
use crate::models::Order;
use crate::models::order::INITIAL_STATUS;
use crate::store::{Collection, DocumentStore};

/// Inputs for placing an order. Presence of `items` and `total` is
/// validated at the route layer; everything else is stored as supplied.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Value,
    pub user_name: String,
    pub items: Value,
    pub total: f64,
    pub address: Value,
}

/// Repository over the `orders` collection.
#[derive(Clone)]
pub struct OrderRepository {
    orders: Collection<Order>,
}

impl OrderRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            orders: Collection::new(store, "orders"),
        }
    }

    /// Insert a new order in the `Pending` status, stamped with the
    /// creation date and time.
    pub async fn place(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        self.orders
            .mutate(move |orders| {
                let order = Order {
                    id: OrderId::new(next_id(orders.iter().map(|order| order.id.as_i64()))),
                    user_id: new.user_id,
                    user_name: new.user_name,
                    items: new.items,
                    total: new.total,
                    address: new.address,
                    status: INITIAL_STATUS.to_owned(),
                    date: locale_date(),
                    time: locale_time(),
                };
                orders.push(order.clone());
                Ok(order)
            })
            .await
    }

    /// Orders whose stored `userId` loosely matches the given value.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.all().await?;
        Ok(orders
            .into_iter()
            .filter(|order| order.belongs_to(user_id))
            .collect())
    }

    /// Full collection scan.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.orders.all().await?)
    }

    /// Overwrite an order's status with the supplied text.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: String,
    ) -> Result<(), RepositoryError> {
        self.orders
            .mutate(move |orders| {
                let order = orders
                    .iter_mut()
                    .find(|order| order.id == id)
                    .ok_or(RepositoryError::NotFound("Order"))?;
                order.status = status;
                Ok(())
            })
            .await
    }

    /// Delete an order. Deleting an absent id is a success.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        self.orders
            .mutate(move |orders| {
                orders.retain(|order| order.id != id);
                Ok(())
            })
            .await
    }
}
