//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar, types::Json};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::models::CartUuid,
        history::UpdatedEntry,
        orders::models::{NewOrder, Order, OrderFilter, OrderStatus, OrderUuid, OrdersFilter},
    },
};

const FIND_ORDER_SQL: &str = include_str!("sql/find_order.sql");
const FIND_OPEN_ORDER_SQL: &str = include_str!("sql/find_open_order.sql");
const ORDER_EXISTS_SQL: &str = include_str!("sql/order_exists.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const DELETE_ORDERS_SQL: &str = include_str!("sql/delete_orders.sql");

/// Durable order documents.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn find_order(&self, filter: OrderFilter) -> Result<Option<Order>, sqlx::Error>;

    async fn order_exists(&self, order: OrderUuid) -> Result<bool, sqlx::Error>;

    async fn list_orders(&self, filter: OrdersFilter) -> Result<Vec<Order>, sqlx::Error>;

    /// Insert an order; a second open order for the same cart is a unique violation.
    async fn insert_order(&self, order: NewOrder) -> Result<OrderUuid, sqlx::Error>;

    /// Move an order from `from` to `to`, returning the rows affected.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
        updated: UpdatedEntry,
    ) -> Result<u64, sqlx::Error>;

    async fn delete_order(&self, order: OrderUuid) -> Result<u64, sqlx::Error>;

    async fn delete_orders(&self, filter: OrdersFilter) -> Result<u64, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn find_order(&self, filter: OrderFilter) -> Result<Option<Order>, sqlx::Error> {
        let (sql, uuid) = match filter {
            OrderFilter::Uuid(order) => (FIND_ORDER_SQL, order.into_uuid()),
            OrderFilter::OpenForCart(cart) => (FIND_OPEN_ORDER_SQL, cart.into_uuid()),
        };

        query_as::<Postgres, Order>(sql)
            .bind(uuid)
            .fetch_optional(self.db.pool())
            .await
    }

    async fn order_exists(&self, order: OrderUuid) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ORDER_EXISTS_SQL)
            .bind(order.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn list_orders(&self, filter: OrdersFilter) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(filter.cart.map(CartUuid::into_uuid))
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(filter.limit.map(i64::from))
            .fetch_all(self.db.pool())
            .await
    }

    async fn insert_order(&self, order: NewOrder) -> Result<OrderUuid, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let uuid: Uuid = query_scalar(INSERT_ORDER_SQL)
            .bind(order.cart_uuid.into_uuid())
            .bind(order.status.as_str())
            .bind(order.fulfillment.as_str())
            .bind(Json(&order.customer))
            .bind(Json(&order.items))
            .bind(Json(&order.discounts))
            .bind(order.sub_total)
            .bind(order.total)
            .bind(order.delivery_charge)
            .bind(&order.remarks)
            .bind(order.billing_address.as_ref().map(Json))
            .bind(Json(&order.shipping_address))
            .bind(&order.created_by)
            .bind(SqlxTimestamp::from(order.created_at))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(OrderUuid::from_uuid(uuid))
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
        updated: UpdatedEntry,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(Json(&updated))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<u64, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn delete_orders(&self, filter: OrdersFilter) -> Result<u64, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_ORDERS_SQL)
            .bind(filter.cart.map(CartUuid::into_uuid))
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(filter.limit.map(i64::from))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let fulfillment: String = row.try_get("fulfillment")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            fulfillment: fulfillment.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "fulfillment".to_string(),
                source: Box::new(e),
            })?,
            customer: row.try_get::<Json<_>, _>("customer")?.0,
            items: row.try_get::<Json<_>, _>("items")?.0,
            discounts: row.try_get::<Json<_>, _>("discounts")?.0,
            sub_total: row.try_get("sub_total")?,
            total: row.try_get("total")?,
            delivery_charge: row.try_get("delivery_charge")?,
            remarks: row.try_get("remarks")?,
            billing_address: row
                .try_get::<Option<Json<_>>, _>("billing_address")?
                .map(|address| address.0),
            shipping_address: row.try_get::<Json<_>, _>("shipping_address")?.0,
            created_by: row.try_get("created_by")?,
            updated: row.try_get::<Json<_>, _>("updated")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
