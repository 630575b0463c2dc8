use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Advertisement {
    pub fn apply_patch(&mut self, patch: AdvertisementPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = (!image_url.is_empty()).then_some(image_url);
        }
    }
}

/// Create payload: identity and creation time are assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvertisement {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub views: u64,
    pub likes: u64,
    pub image_url: String,
}

impl NewAdvertisement {
    pub fn into_advertisement(self, id: String, created_at: DateTime<Utc>) -> Advertisement {
        Advertisement {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            views: self.views,
            likes: self.likes,
            image_url: (!self.image_url.is_empty()).then_some(self.image_url),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
