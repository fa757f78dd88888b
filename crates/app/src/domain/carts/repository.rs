//! Carts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar, types::Json};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::carts::models::{Cart, CartStatus, CartUpdate, CartUuid, CartsFilter, ItemsMutation, NewCart},
};

const FIND_CART_SQL: &str = include_str!("sql/find_cart.sql");
const CART_EXISTS_SQL: &str = include_str!("sql/cart_exists.sql");
const LIST_CARTS_SQL: &str = include_str!("sql/list_carts.sql");
const INSERT_CART_SQL: &str = include_str!("sql/insert_cart.sql");
const APPEND_CART_ITEM_SQL: &str = include_str!("sql/append_cart_item.sql");
const REMOVE_CART_ITEMS_SQL: &str = include_str!("sql/remove_cart_items.sql");
const DELETE_CART_SQL: &str = include_str!("sql/delete_cart.sql");
const DELETE_CARTS_SQL: &str = include_str!("sql/delete_carts.sql");

/// Durable cart documents.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    async fn find_cart(&self, cart: CartUuid) -> Result<Option<Cart>, sqlx::Error>;

    async fn cart_exists(&self, cart: CartUuid) -> Result<bool, sqlx::Error>;

    async fn list_carts(&self, filter: CartsFilter) -> Result<Vec<Cart>, sqlx::Error>;

    async fn insert_cart(&self, cart: NewCart) -> Result<CartUuid, sqlx::Error>;

    /// Apply `update` if the stored version still matches, returning the rows affected.
    async fn update_cart(&self, cart: CartUuid, update: CartUpdate) -> Result<u64, sqlx::Error>;

    async fn delete_cart(&self, cart: CartUuid) -> Result<u64, sqlx::Error>;

    /// Delete every cart matching `filter`, returning the deleted uuids.
    async fn delete_carts(&self, filter: CartsFilter) -> Result<Vec<CartUuid>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    db: Db,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn find_cart(&self, cart: CartUuid) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(FIND_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_optional(self.db.pool())
            .await
    }

    async fn cart_exists(&self, cart: CartUuid) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CART_EXISTS_SQL)
            .bind(cart.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn list_carts(&self, filter: CartsFilter) -> Result<Vec<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(LIST_CARTS_SQL)
            .bind(filter.status.map(CartStatus::as_str))
            .bind(filter.limit.map(i64::from))
            .fetch_all(self.db.pool())
            .await
    }

    async fn insert_cart(&self, cart: NewCart) -> Result<CartUuid, sqlx::Error> {
        let totals = cart.totals();

        let mut tx = self.db.begin().await?;

        let uuid: Uuid = query_scalar(INSERT_CART_SQL)
            .bind(cart.status.as_str())
            .bind(Json(&cart.customer))
            .bind(Json(&cart.items))
            .bind(Json(&cart.discounts))
            .bind(totals.sub_total)
            .bind(totals.total)
            .bind(cart.delivery_charge)
            .bind(&cart.remarks)
            .bind(&cart.created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(CartUuid::from_uuid(uuid))
    }

    async fn update_cart(&self, cart: CartUuid, update: CartUpdate) -> Result<u64, sqlx::Error> {
        let version = try_into_version(update.expected_version)?;

        let mut tx = self.db.begin().await?;

        let statement = match &update.items {
            ItemsMutation::Append(item) => query(APPEND_CART_ITEM_SQL)
                .bind(cart.into_uuid())
                .bind(version)
                .bind(update.totals.sub_total)
                .bind(update.totals.total)
                .bind(Json(item)),
            ItemsMutation::RemoveBySlug(slug) => query(REMOVE_CART_ITEMS_SQL)
                .bind(cart.into_uuid())
                .bind(version)
                .bind(update.totals.sub_total)
                .bind(update.totals.total)
                .bind(slug),
        };

        let rows_affected = statement
            .bind(Json(&update.updated))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<u64, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn delete_carts(&self, filter: CartsFilter) -> Result<Vec<CartUuid>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let deleted = query_scalar::<Postgres, Uuid>(DELETE_CARTS_SQL)
            .bind(filter.status.map(CartStatus::as_str))
            .bind(filter.limit.map(i64::from))
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.into_iter().map(CartUuid::from_uuid).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            customer: row.try_get::<Json<_>, _>("customer")?.0,
            items: row.try_get::<Json<_>, _>("items")?.0,
            discounts: row.try_get::<Json<_>, _>("discounts")?.0,
            sub_total: row.try_get("sub_total")?,
            total: row.try_get("total")?,
            delivery_charge: row.try_get("delivery_charge")?,
            remarks: row.try_get("remarks")?,
            created_by: row.try_get("created_by")?,
            updated: row.try_get::<Json<_>, _>("updated")?.0,
            version: try_get_version(row, "version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

fn try_get_version(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let version: i64 = row.try_get(col)?;

    u64::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_into_version(version: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(version).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
