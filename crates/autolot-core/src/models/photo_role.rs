use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Photo slot roles for a car listing
///
/// Every listing has exactly one slot per role. The declaration order is the
/// canonical presentation order: slot images are concatenated in this order
/// when a draft is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhotoRole {
    Front,
    Rear,
    Left,
    Right,
    Engine,
    InteriorDriver,
    InteriorPassenger,
    Trunk,
}

impl PhotoRole {
    /// All roles in canonical order.
    pub const ALL: [PhotoRole; 8] = [
        PhotoRole::Front,
        PhotoRole::Rear,
        PhotoRole::Left,
        PhotoRole::Right,
        PhotoRole::Engine,
        PhotoRole::InteriorDriver,
        PhotoRole::InteriorPassenger,
        PhotoRole::Trunk,
    ];

    /// Human-readable label, used in error messages and admin UI copy.
    pub fn label(&self) -> &'static str {
        match self {
            PhotoRole::Front => "Front",
            PhotoRole::Rear => "Rear",
            PhotoRole::Left => "Left side",
            PhotoRole::Right => "Right side",
            PhotoRole::Engine => "Engine",
            PhotoRole::InteriorDriver => "Interior (driver)",
            PhotoRole::InteriorPassenger => "Interior (passenger)",
            PhotoRole::Trunk => "Trunk",
        }
    }

    /// The front photo is the listing's primary image.
    pub fn is_primary(&self) -> bool {
        matches!(self, PhotoRole::Front)
    }
}

impl FromStr for PhotoRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(PhotoRole::Front),
            "rear" => Ok(PhotoRole::Rear),
            "left" => Ok(PhotoRole::Left),
            "right" => Ok(PhotoRole::Right),
            "engine" => Ok(PhotoRole::Engine),
            "interior_driver" => Ok(PhotoRole::InteriorDriver),
            "interior_passenger" => Ok(PhotoRole::InteriorPassenger),
            "trunk" => Ok(PhotoRole::Trunk),
            _ => Err(anyhow::anyhow!("Invalid photo role: {}", s)),
        }
    }
}

impl Display for PhotoRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PhotoRole::Front => write!(f, "front"),
            PhotoRole::Rear => write!(f, "rear"),
            PhotoRole::Left => write!(f, "left"),
            PhotoRole::Right => write!(f, "right"),
            PhotoRole::Engine => write!(f, "engine"),
            PhotoRole::InteriorDriver => write!(f, "interior_driver"),
            PhotoRole::InteriorPassenger => write!(f, "interior_passenger"),
            PhotoRole::Trunk => write!(f, "trunk"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_starts_with_front() {
        assert_eq!(PhotoRole::ALL[0], PhotoRole::Front);
        assert_eq!(PhotoRole::ALL.len(), 8);
    }

    #[test]
    fn test_display_from_str_round_trip() {
        for role in PhotoRole::ALL {
            let parsed: PhotoRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_only_front_is_primary() {
        let primary: Vec<_> = PhotoRole::ALL.iter().filter(|r| r.is_primary()).collect();
        assert_eq!(primary, vec![&PhotoRole::Front]);
    }

    #[test]
    fn test_from_str_rejects_unknown_role() {
        assert!("sunroof".parse::<PhotoRole>().is_err());
    }
}
