// src/domain/listing.rs

use crate::domain::fields;
use crate::domain::proposal::{join_name, Guest, Host, ListingSummary, Proposal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A bookable listing as offered to the creation wizard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub unique_id: String,
    pub name: String,
    pub address: String,
    pub rental_type: String,
    pub photos: Vec<String>,
    pub damage_deposit: f64,
    pub cleaning_cost: f64,
    pub nightly_price: f64,
    pub last_modified: DateTime<Utc>,
    pub house_rules: Vec<String>,
    pub host: Option<User>,
}

/// A guest or host account as offered to the creation wizard.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub unique_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub profile_photo: String,
    pub about_me: String,
    pub need_for_space: String,
    pub special_needs: String,
    pub is_usability_tester: bool,
}

impl Listing {
    pub fn from_value(data: &Value) -> Self {
        let host = match data.get("host") {
            Some(v) if fields::is_truthy(v) => Some(User::from_value(v)),
            _ => None,
        };
        Self {
            unique_id: fields::text(data, "uniqueId"),
            name: fields::text(data, "name"),
            address: fields::text(data, "address"),
            rental_type: fields::text(data, "rentalType"),
            photos: fields::texts(data, "photos"),
            damage_deposit: fields::number(data, "damageDeposit"),
            cleaning_cost: fields::number(data, "cleaningCost"),
            nightly_price: fields::number(data, "nightlyPrice"),
            last_modified: fields::timestamp(data, "lastModified", Utc::now()),
            house_rules: fields::texts(data, "houseRules"),
            host,
        }
    }

    /// The listing behind an existing proposal; the nightly rate comes from
    /// the proposal's stored pricing.
    pub fn from_proposal(p: &Proposal) -> Self {
        let l = &p.listing;
        Self {
            unique_id: l.unique_id.clone(),
            name: l.name.clone(),
            address: l.address.clone(),
            rental_type: l.rental_type.clone(),
            photos: l.photos.clone(),
            damage_deposit: l.damage_deposit,
            cleaning_cost: l.cleaning_cost,
            nightly_price: p.pricing.nightly_price,
            last_modified: l.last_modified,
            house_rules: l.house_rules.clone(),
            host: Some(User::from_host(&p.host)),
        }
    }

    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            name: self.name.clone(),
            unique_id: self.unique_id.clone(),
            address: self.address.clone(),
            rental_type: self.rental_type.clone(),
            photos: self.photos.clone(),
            damage_deposit: self.damage_deposit,
            cleaning_cost: self.cleaning_cost,
            last_modified: self.last_modified,
            house_rules: self.house_rules.clone(),
        }
    }

    /// Case-insensitive match on host name / email, listing name, id or rental type.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        let host_fields = self
            .host
            .iter()
            .flat_map(|h| [h.full_name(), h.email.clone()]);
        [self.name.clone(), self.unique_id.clone(), self.rental_type.clone()]
            .into_iter()
            .chain(host_fields)
            .any(|field| field.to_lowercase().contains(&term))
    }
}

impl<'de> Deserialize<'de> for Listing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Listing::from_value(&value))
    }
}

impl User {
    pub fn from_value(data: &Value) -> Self {
        Self {
            unique_id: fields::text(data, "uniqueId"),
            first_name: fields::text(data, "firstName"),
            last_name: fields::text(data, "lastName"),
            email: fields::text(data, "email"),
            phone_number: fields::text(data, "phoneNumber"),
            profile_photo: fields::text(data, "profilePhoto"),
            about_me: fields::text(data, "aboutMe"),
            need_for_space: fields::text(data, "needForSpace"),
            special_needs: fields::text(data, "specialNeeds"),
            is_usability_tester: fields::flag(data, "isUsabilityTester"),
        }
    }

    pub fn from_guest(g: &Guest) -> Self {
        Self {
            unique_id: String::new(),
            first_name: g.first_name.clone(),
            last_name: g.last_name.clone(),
            email: g.email.clone(),
            phone_number: g.phone_number.clone(),
            profile_photo: g.profile_photo.clone(),
            about_me: g.about_me.clone(),
            need_for_space: g.need_for_space.clone(),
            special_needs: g.special_needs.clone(),
            is_usability_tester: g.is_usability_tester,
        }
    }

    pub fn from_host(h: &Host) -> Self {
        Self {
            first_name: h.first_name.clone(),
            last_name: h.last_name.clone(),
            email: h.email.clone(),
            phone_number: h.phone_number.clone(),
            profile_photo: h.profile_photo.clone(),
            is_usability_tester: h.is_usability_tester,
            ..Self::default()
        }
    }

    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    pub fn as_host(&self) -> Host {
        Host {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            profile_photo: self.profile_photo.clone(),
            is_usability_tester: self.is_usability_tester,
        }
    }

    /// Users are looked up by e-mail; ids are optional on this surface.
    pub fn key(&self) -> &str {
        if self.unique_id.is_empty() {
            &self.email
        } else {
            &self.unique_id
        }
    }

    /// Case-insensitive match on name, email or phone number.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone_number,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(User::from_value(&value))
    }
}
