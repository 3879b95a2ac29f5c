use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::catalog::{
    self, Frequency, DEFAULT_SERVICE_TIER, MAX_BATHROOMS, MAX_BEDROOMS, MIN_BATHROOMS,
    MIN_BEDROOMS,
};

pub const ZIP_CODE_MAX_LEN: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The in-progress booking selection collected by the wizard.
///
/// A draft is only ever changed through [`BookingDraft::apply`] and
/// [`BookingDraft::toggle_add_on`], both of which consume the draft and
/// return its replacement. Updates that would leave a field outside its
/// allowed values return the draft unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDraft {
    pub service_category: Option<String>,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub square_footage: Option<String>,
    pub service_tier: String,
    pub frequency: Frequency,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub contact: Contact,
    pub add_ons: Vec<String>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        BookingDraft {
            service_category: None,
            bedrooms: 1,
            bathrooms: 1,
            square_footage: None,
            service_tier: DEFAULT_SERVICE_TIER.to_string(),
            frequency: Frequency::OneTime,
            date: None,
            time: None,
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            contact: Contact::default(),
            add_ons: Vec::new(),
        }
    }
}

/// A single field change, addressed by its path in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DraftUpdate {
    ServiceCategory(Option<String>),
    Bedrooms(u8),
    Bathrooms(u8),
    SquareFootage(Option<String>),
    ServiceTier(String),
    Frequency(String),
    Date(Option<NaiveDate>),
    Time(Option<String>),
    Address(String),
    City(String),
    State(String),
    ZipCode(String),
    #[serde(rename = "contact.name")]
    ContactName(String),
    #[serde(rename = "contact.email")]
    ContactEmail(String),
    #[serde(rename = "contact.phone")]
    ContactPhone(String),
}

impl BookingDraft {
    pub fn apply(self, update: DraftUpdate) -> BookingDraft {
        match update {
            DraftUpdate::ServiceCategory(category) => match category {
                None => BookingDraft {
                    service_category: None,
                    ..self
                },
                Some(id) if catalog::find_service_category(&id).is_some() => BookingDraft {
                    service_category: Some(id),
                    ..self
                },
                Some(_) => self,
            },
            DraftUpdate::Bedrooms(count) if (MIN_BEDROOMS..=MAX_BEDROOMS).contains(&count) => {
                BookingDraft {
                    bedrooms: count,
                    ..self
                }
            }
            DraftUpdate::Bathrooms(count) if (MIN_BATHROOMS..=MAX_BATHROOMS).contains(&count) => {
                BookingDraft {
                    bathrooms: count,
                    ..self
                }
            }
            DraftUpdate::Bedrooms(_) | DraftUpdate::Bathrooms(_) => self,
            DraftUpdate::SquareFootage(band) => match band {
                None => BookingDraft {
                    square_footage: None,
                    ..self
                },
                Some(band) if catalog::is_square_footage_band(&band) => BookingDraft {
                    square_footage: Some(band),
                    ..self
                },
                Some(_) => self,
            },
            DraftUpdate::ServiceTier(id) => {
                if catalog::find_service_tier(&id).is_some() {
                    BookingDraft {
                        service_tier: id,
                        ..self
                    }
                } else {
                    self
                }
            }
            DraftUpdate::Frequency(id) => match Frequency::from_id(&id) {
                Some(frequency) => BookingDraft { frequency, ..self },
                None => self,
            },
            DraftUpdate::Date(date) => BookingDraft { date, ..self },
            DraftUpdate::Time(slot) => match slot {
                None => BookingDraft { time: None, ..self },
                Some(slot) if catalog::is_time_slot(&slot) => BookingDraft {
                    time: Some(slot),
                    ..self
                },
                Some(_) => self,
            },
            DraftUpdate::Address(address) => BookingDraft { address, ..self },
            DraftUpdate::City(city) => BookingDraft { city, ..self },
            DraftUpdate::State(state) => BookingDraft { state, ..self },
            DraftUpdate::ZipCode(zip_code) => BookingDraft {
                zip_code: zip_code.chars().take(ZIP_CODE_MAX_LEN).collect(),
                ..self
            },
            DraftUpdate::ContactName(name) => BookingDraft {
                contact: Contact {
                    name,
                    ..self.contact
                },
                ..self
            },
            DraftUpdate::ContactEmail(email) => BookingDraft {
                contact: Contact {
                    email,
                    ..self.contact
                },
                ..self
            },
            DraftUpdate::ContactPhone(phone) => BookingDraft {
                contact: Contact {
                    phone,
                    ..self.contact
                },
                ..self
            },
        }
    }

    /// Adds the add-on if it is not selected, removes it if it is.
    pub fn toggle_add_on(self, id: &str) -> BookingDraft {
        if catalog::find_add_on(id).is_none() {
            return self;
        }

        let mut add_ons = self.add_ons;
        match add_ons.iter().position(|selected| selected == id) {
            Some(index) => {
                add_ons.remove(index);
            }
            None => add_ons.push(id.to_string()),
        }

        BookingDraft { add_ons, ..self }
    }

    /// Rebuilds a draft that did not come from the wizard, such as a quote
    /// request body, through the same updates the wizard applies. Values the
    /// catalog does not accept fall back to their defaults and repeated
    /// add-ons are kept once.
    pub fn normalized(self) -> BookingDraft {
        let updates = [
            DraftUpdate::ServiceCategory(self.service_category),
            DraftUpdate::Bedrooms(self.bedrooms),
            DraftUpdate::Bathrooms(self.bathrooms),
            DraftUpdate::SquareFootage(self.square_footage),
            DraftUpdate::ServiceTier(self.service_tier),
            DraftUpdate::Frequency(self.frequency.id().to_string()),
            DraftUpdate::Date(self.date),
            DraftUpdate::Time(self.time),
            DraftUpdate::Address(self.address),
            DraftUpdate::City(self.city),
            DraftUpdate::State(self.state),
            DraftUpdate::ZipCode(self.zip_code),
            DraftUpdate::ContactName(self.contact.name),
            DraftUpdate::ContactEmail(self.contact.email),
            DraftUpdate::ContactPhone(self.contact.phone),
        ];
        let draft = updates
            .into_iter()
            .fold(BookingDraft::default(), BookingDraft::apply);

        self.add_ons.iter().fold(draft, |draft, id| {
            if draft.has_add_on(id) {
                draft
            } else {
                draft.toggle_add_on(id)
            }
        })
    }

    pub fn has_add_on(&self, id: &str) -> bool {
        self.add_ons.iter().any(|selected| selected == id)
    }

    /// "Studio, 1 Bathroom" / "2 Bedrooms, 3 Bathrooms"
    pub fn space_label(&self) -> String {
        let bedrooms = match self.bedrooms {
            0 => "Studio".to_string(),
            1 => "1 Bedroom".to_string(),
            n => format!("{} Bedrooms", n),
        };
        let bathrooms = match self.bathrooms {
            1 => "1 Bathroom".to_string(),
            n => format!("{} Bathrooms", n),
        };
        format!("{}, {}", bedrooms, bathrooms)
    }

    /// Sidebar form: "Studio, 1BA" / "2BR, 1BA"
    pub fn compact_space_label(&self) -> String {
        let bedrooms = match self.bedrooms {
            0 => "Studio".to_string(),
            n => format!("{}BR", n),
        };
        format!("{}, {}BA", bedrooms, self.bathrooms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Cancelled and completed bookings never show as upcoming.
    pub fn is_closed(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

/// What the wizard hands to the booking store on confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSubmission {
    pub user_id: String,
    #[serde(flatten)]
    pub details: BookingDraft,
    pub total_price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub details: BookingDraft,
    /// Charged price at submission time, never recomputed.
    pub total_price: u32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn from_submission(id: String, submission: BookingSubmission, now: DateTime<Utc>) -> Self {
        BookingRecord {
            id,
            user_id: submission.user_id,
            details: submission.details,
            total_price: submission.total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        self.details.date
    }
}
