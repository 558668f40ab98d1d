use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

use autolot_core::models::{Car, CarImage, CarInsert};
use autolot_core::AppError;

/// Raw cars row; the image list is stored as JSONB and parsed into
/// [`CarImage`] values when converting to the domain model.
#[derive(Debug, FromRow)]
struct CarRow {
    id: Uuid,
    title: String,
    price: Decimal,
    year: i32,
    km: i32,
    transmission: String,
    fuel: String,
    description: Option<String>,
    images: JsonValue,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CarRow {
    fn into_car(self) -> Result<Car, AppError> {
        let images: Vec<CarImage> = serde_json::from_value(self.images)?;
        Ok(Car {
            id: self.id,
            title: self.title,
            price: self.price,
            year: self.year,
            km: self.km,
            transmission: self.transmission,
            fuel: self.fuel,
            description: self.description,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Car listing repository
///
/// A listing's photos live in the `images` JSONB column of its row, so a
/// listing and its full image list are created in a single INSERT.
#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a car listing atomically: the row and its complete image list
    /// are written in one statement.
    #[tracing::instrument(skip(self, insert), fields(db.table = "cars", db.operation = "insert", title = %insert.fields.title))]
    pub async fn create_car(&self, insert: CarInsert) -> Result<Car, AppError> {
        let images = serde_json::to_value(&insert.images)?;
        let fields = insert.fields;

        let row: CarRow = sqlx::query_as::<Postgres, CarRow>(
            "INSERT INTO cars (title, price, year, km, transmission, fuel, description, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&fields.title)
        .bind(fields.price)
        .bind(fields.year)
        .bind(fields.km)
        .bind(&fields.transmission)
        .bind(&fields.fuel)
        .bind(&fields.description)
        .bind(images)
        .fetch_one(&self.pool)
        .await?;

        row.into_car()
    }

    #[tracing::instrument(skip(self), fields(db.table = "cars", db.operation = "select", db.record_id = %id))]
    pub async fn get_car(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let row: Option<CarRow> =
            sqlx::query_as::<Postgres, CarRow>("SELECT * FROM cars WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(r) => Ok(Some(r.into_car()?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "cars", db.operation = "select"))]
    pub async fn list_cars(&self, limit: i64, offset: i64) -> Result<Vec<Car>, AppError> {
        let rows: Vec<CarRow> = sqlx::query_as::<Postgres, CarRow>(
            "SELECT * FROM cars ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CarRow::into_car).collect()
    }

    /// Delete a listing and return the deleted row so the caller can clean
    /// up the stored images.
    #[tracing::instrument(skip(self), fields(db.table = "cars", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_car(&self, id: Uuid) -> Result<Car, AppError> {
        let row: Option<CarRow> =
            sqlx::query_as::<Postgres, CarRow>("DELETE FROM cars WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(r) => r.into_car(),
            None => Err(AppError::NotFound(format!("Car {} not found", id))),
        }
    }
}
