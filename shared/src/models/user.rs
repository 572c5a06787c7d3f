//! User Model

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum UserRole {
    Admin,
    Subadmin,
    Customer,
}

impl UserRole {
    /// Admin or subadmin; staff may see and manage all orders
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Subadmin)
    }
}

/// User entity
///
/// Address fields are optional; courier checkout requires a complete
/// address (see [`User::has_complete_address`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,

    // -- Address fields --
    pub province: Option<String>,
    pub province_id: Option<String>,
    pub city: Option<String>,
    pub city_id: Option<String>,
    pub district: Option<String>,
    pub district_id: Option<String>,
    pub subdistrict: Option<String>,
    pub subdistrict_id: Option<String>,
    pub postal_code: Option<String>,
    pub address_detail: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

impl User {
    /// Courier shipping requires phone, address detail, province and city
    pub fn has_complete_address(&self) -> bool {
        filled(&self.phone)
            && filled(&self.address_detail)
            && filled(&self.province)
            && filled(&self.city)
    }

    /// Denormalized address string snapshotted onto orders:
    /// detail, district, city, province (comma-separated), postal code
    /// appended with a space.
    pub fn full_address(&self) -> String {
        let mut address = self.address_detail.clone().unwrap_or_default();
        for part in [&self.district, &self.city, &self.province] {
            if let Some(p) = part.as_deref().filter(|p| !p.is_empty()) {
                address.push_str(", ");
                address.push_str(p);
            }
        }
        if let Some(postal) = self.postal_code.as_deref().filter(|p| !p.is_empty()) {
            address.push(' ');
            address.push_str(postal);
        }
        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_address() -> User {
        User {
            id: 1,
            name: "Budi".into(),
            email: "budi@example.com".into(),
            phone: Some("081234567890".into()),
            role: UserRole::Customer,
            province: Some("Jawa Barat".into()),
            province_id: Some("9".into()),
            city: Some("Bandung".into()),
            city_id: Some("23".into()),
            district: Some("Coblong".into()),
            district_id: None,
            subdistrict: None,
            subdistrict_id: None,
            postal_code: Some("40132".into()),
            address_detail: Some("Jl. Dago 12".into()),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_complete_address() {
        let mut user = user_with_address();
        assert!(user.has_complete_address());

        user.phone = Some(String::new());
        assert!(!user.has_complete_address());

        user.phone = Some("081234567890".into());
        user.city = None;
        assert!(!user.has_complete_address());
    }

    #[test]
    fn test_full_address_format() {
        let user = user_with_address();
        assert_eq!(
            user.full_address(),
            "Jl. Dago 12, Coblong, Bandung, Jawa Barat 40132"
        );
    }

    #[test]
    fn test_full_address_skips_empty_parts() {
        let mut user = user_with_address();
        user.district = None;
        user.postal_code = None;
        assert_eq!(user.full_address(), "Jl. Dago 12, Bandung, Jawa Barat");
    }
}
