use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Visibility of a catalog row.
///
/// Rows are never removed; deleting flips them to `Inactive` and nothing
/// flips them back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityState {
    #[default]
    Active,
    Inactive,
}

impl ActivityState {
    pub fn is_active(self) -> bool {
        self == ActivityState::Active
    }

    /// The only transition. `None` when the row is already inactive.
    pub fn deactivate(self) -> Option<ActivityState> {
        match self {
            ActivityState::Active => Some(ActivityState::Inactive),
            ActivityState::Inactive => None,
        }
    }
}

impl From<bool> for ActivityState {
    fn from(is_active: bool) -> Self {
        if is_active {
            ActivityState::Active
        } else {
            ActivityState::Inactive
        }
    }
}

/// Product category, optionally nested under a parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub is_active: bool,
}

impl Category {
    pub fn state(&self) -> ActivityState {
        self.is_active.into()
    }
}

/// Sellable item belonging to exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub stock: i32,
    pub category_id: i32,
    pub is_active: bool,
}

impl Product {
    pub fn state(&self) -> ActivityState {
        self.is_active.into()
    }

    /// Listed for sale: active, in an active category, and in stock.
    pub fn is_available(&self, category: &Category) -> bool {
        self.is_active && category.is_active && self.stock > 0
    }
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

/// DTO for a partial category update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    pub parent_id: Option<i32>,
}

impl UpdateCategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none()
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub image_url: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    pub category_id: i32,
}

/// DTO for a partial product update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// `null` clears the description
    #[validate(length(max = 500))]
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    /// `null` clears the image URL
    #[validate(length(max = 200))]
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub image_url: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
    }
}

/// Keeps an explicit `null` apart from an absent field: absent stays `None`
/// through `#[serde(default)]`, `null` becomes `Some(None)`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response body for logical deletes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Acknowledgement {
    pub status: String,
    pub message: String,
}

impl Acknowledgement {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}
