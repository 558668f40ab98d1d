use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::photo_role::PhotoRole;

/// A single stored image belonging to a car listing.
///
/// Slot images carry a `role` and no `order`; gallery images carry an
/// `order` and no `role`. The full image list is stored as JSONB on the
/// cars row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<PhotoRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Listing fields entered by staff, independent of photos.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarFields {
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub year: i32,
    pub km: i32,
    pub transmission: String,
    pub fuel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A fully assembled listing ready for atomic insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarInsert {
    pub fields: CarFields,
    pub images: Vec<CarImage>,
}

/// A persisted car listing row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Car {
    pub id: Uuid,
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub year: i32,
    pub km: i32,
    pub transmission: String,
    pub fuel: String,
    pub description: Option<String>,
    pub images: Vec<CarImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    /// The listing's primary image, if any.
    pub fn primary_image(&self) -> Option<&CarImage> {
        self.images
            .iter()
            .find(|img| img.is_primary == Some(true))
            .or_else(|| self.images.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> CarImage {
        CarImage {
            url: url.to_string(),
            role: None,
            order: None,
            is_primary: None,
            uploaded_at: None,
        }
    }

    #[test]
    fn test_car_image_serde_skips_empty_fields() {
        let json = serde_json::to_value(image("https://cdn.example.com/a.webp")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "url": "https://cdn.example.com/a.webp" })
        );
    }

    #[test]
    fn test_car_image_role_serializes_snake_case() {
        let mut img = image("https://cdn.example.com/a.webp");
        img.role = Some(PhotoRole::InteriorDriver);
        let json = serde_json::to_value(&img).unwrap();
        assert_eq!(json["role"], "interior_driver");
    }

    #[test]
    fn test_primary_image_falls_back_to_first() {
        let car = Car {
            id: Uuid::new_v4(),
            title: "Fiat Uno".to_string(),
            price: Decimal::new(1250000, 2),
            year: 2015,
            km: 84000,
            transmission: "Manual".to_string(),
            fuel: "Gasolina".to_string(),
            description: None,
            images: vec![image("https://cdn.example.com/first.webp")],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            car.primary_image().map(|i| i.url.as_str()),
            Some("https://cdn.example.com/first.webp")
        );
    }
}
