use std::fmt;
use std::str::FromStr;

use market_types::domain::advertisement::{Advertisement, AdvertisementPatch, NewAdvertisement};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdField {
    Name,
    Description,
    Price,
    ImageUrl,
}

impl AdField {
    pub const ALL: [AdField; 4] = [
        AdField::ImageUrl,
        AdField::Name,
        AdField::Description,
        AdField::Price,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdField::Name => "Name",
            AdField::Description => "Description",
            AdField::Price => "Price",
            AdField::ImageUrl => "Image URL",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            AdField::Name => "name",
            AdField::Description => "description",
            AdField::Price => "price",
            AdField::ImageUrl => "image",
        }
    }
}

impl fmt::Display for AdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AdField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(AdField::Name),
            "description" | "desc" => Ok(AdField::Description),
            "price" => Ok(AdField::Price),
            "image" | "image-url" | "imageurl" => Ok(AdField::ImageUrl),
            other => Err(format!(
                "unknown field: {other} (expected name, description, price or image)"
            )),
        }
    }
}

/// Raw text of the create/edit dialog. Nothing is validated before sending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvertisementForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    /// Message of the last failed submit, shown inside the dialog.
    pub error: Option<String>,
}

impl AdvertisementForm {
    /// Empty create dialog: price starts at 0.
    pub fn blank() -> Self {
        Self {
            price: "0".into(),
            ..Self::default()
        }
    }

    pub fn from_advertisement(ad: &Advertisement) -> Self {
        Self {
            name: ad.name.clone(),
            description: ad.description.clone(),
            price: ad.price.to_string(),
            image_url: ad.image_url.clone().unwrap_or_default(),
            error: None,
        }
    }

    pub fn value(&self, field: AdField) -> &str {
        match field {
            AdField::Name => &self.name,
            AdField::Description => &self.description,
            AdField::Price => &self.price,
            AdField::ImageUrl => &self.image_url,
        }
    }

    pub fn set(&mut self, field: AdField, value: String) {
        let slot = match field {
            AdField::Name => &mut self.name,
            AdField::Description => &mut self.description,
            AdField::Price => &mut self.price,
            AdField::ImageUrl => &mut self.image_url,
        };
        *slot = value;
    }

    /// Price text that is not a number goes out as 0.
    fn price_value(&self) -> f64 {
        match self.price.trim().parse::<f64>() {
            Ok(price) => price,
            Err(_) => {
                tracing::debug!(input = %self.price, "price is not numeric, sending 0");
                0.0
            }
        }
    }

    pub fn to_new_advertisement(&self) -> NewAdvertisement {
        NewAdvertisement {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price_value(),
            views: 0,
            likes: 0,
            image_url: self.image_url.clone(),
        }
    }

    pub fn to_patch(&self) -> AdvertisementPatch {
        AdvertisementPatch {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            price: Some(self.price_value()),
            image_url: Some(self.image_url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn blank_form_builds_zeroed_payload() {
        let mut form = AdvertisementForm::blank();
        form.set(AdField::Name, "Lamp".into());
        let payload = form.to_new_advertisement();
        assert_eq!(payload.name, "Lamp");
        assert_eq!(payload.price, 0.0);
        assert_eq!(payload.views, 0);
        assert_eq!(payload.image_url, "");
    }

    #[test]
    fn non_numeric_price_is_sent_as_zero() {
        let mut form = AdvertisementForm::blank();
        form.set(AdField::Price, "cheap".into());
        assert_eq!(form.to_patch().price, Some(0.0));
        form.set(AdField::Price, " 1250.5 ".into());
        assert_eq!(form.to_patch().price, Some(1250.5));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let ad = Advertisement {
            id: "9".into(),
            name: "Bike".into(),
            description: "Red".into(),
            price: 5000.0,
            views: 1,
            likes: 2,
            image_url: Some("https://img/bike.png".into()),
            created_at: Utc::now(),
        };
        let form = AdvertisementForm::from_advertisement(&ad);
        assert_eq!(form.value(AdField::Price), "5000");
        assert_eq!(form.value(AdField::ImageUrl), "https://img/bike.png");
        assert_eq!(
            form.to_patch(),
            AdvertisementPatch {
                name: Some("Bike".into()),
                description: Some("Red".into()),
                price: Some(5000.0),
                image_url: Some("https://img/bike.png".into()),
            }
        );
    }

    #[test]
    fn saving_without_image_keeps_it_empty() {
        let mut ad = Advertisement {
            id: "3".into(),
            name: "Lamp".into(),
            description: String::new(),
            price: 10.0,
            views: 0,
            likes: 0,
            image_url: None,
            created_at: Utc::now(),
        };
        let patch = AdvertisementForm::from_advertisement(&ad).to_patch();
        assert_eq!(patch.image_url.as_deref(), Some(""));
        ad.apply_patch(patch);
        assert_eq!(ad.image_url, None);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("image-url".parse::<AdField>(), Ok(AdField::ImageUrl));
        assert_eq!("Price".parse::<AdField>(), Ok(AdField::Price));
        assert!("views".parse::<AdField>().is_err());
    }
}
