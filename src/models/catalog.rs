use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceTier {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub base_price: u32,
    pub duration_label: &'static str,
    pub popular: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOn {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
}

/// Service lines advertised on the marketing site, picked in the first step
/// of the full wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

pub const DEFAULT_SERVICE_TIER: &str = "standard-plus";

pub const SERVICE_TIERS: &[ServiceTier] = &[
    ServiceTier {
        id: "standard",
        name: "Standard",
        description: "60pt Checklist",
        features: &["Recurring options available", "Add-ons available"],
        base_price: 80,
        duration_label: "2-3 hours",
        popular: false,
    },
    ServiceTier {
        id: "standard-plus",
        name: "Standard Plus",
        description: "75pt Checklist",
        features: &[
            "Recurring options available",
            "Add-ons available",
            "50% Additional time",
        ],
        base_price: 120,
        duration_label: "3-4 hours",
        popular: true,
    },
    ServiceTier {
        id: "deep",
        name: "Deep Cleaning",
        description: "75pt Checklist",
        features: &[
            "Recurring options available",
            "Add-ons included (Fridge, oven, cabinets)",
            "150% Additional time",
        ],
        base_price: 180,
        duration_label: "4-6 hours",
        popular: false,
    },
];

pub const ADD_ONS: &[AddOn] = &[
    AddOn {
        id: "inside-fridge",
        name: "Inside Fridge (empty)",
        description: "Deep clean inside of refrigerator",
        price: 30,
    },
    AddOn {
        id: "inside-oven",
        name: "Inside Oven",
        description: "Clean inside of oven and racks",
        price: 30,
    },
    AddOn {
        id: "inside-microwave",
        name: "Inside Microwave",
        description: "Clean inside of microwave",
        price: 20,
    },
    AddOn {
        id: "kitchen-cabinets",
        name: "Inside Kitchen Cabinets (empty)",
        description: "Wipe down inside of empty cabinets",
        price: 30,
    },
    AddOn {
        id: "pets-hair",
        name: "Pets/Pet Hair",
        description: "Extra attention for pet hair removal",
        price: 30,
    },
    AddOn {
        id: "wash-dishes",
        name: "Wash Dishes",
        description: "Hand wash dishes and cookware",
        price: 25,
    },
    AddOn {
        id: "laundry",
        name: "Wash Load of Laundry",
        description: "Wash, dry, and fold one load",
        price: 30,
    },
    AddOn {
        id: "interior-windows",
        name: "Clean Interior Windows",
        description: "Clean all interior windows",
        price: 60,
    },
    AddOn {
        id: "window-blinds",
        name: "Clean Window Blinds",
        description: "Dust and wipe window blinds",
        price: 30,
    },
    AddOn {
        id: "baseboards",
        name: "Wipe Down Baseboards",
        description: "Clean all baseboards throughout home",
        price: 45,
    },
    AddOn {
        id: "basement",
        name: "Clean Finished Basement",
        description: "Clean finished basement area",
        price: 40,
    },
    AddOn {
        id: "organizing",
        name: "Hour of Organizing",
        description: "Professional organizing service per hour",
        price: 40,
    },
];

pub const SERVICE_CATEGORIES: &[ServiceCategory] = &[
    ServiceCategory {
        id: "residential",
        title: "Residential Cleaning",
        description: "Complete home cleaning with eco-friendly products. Regular, deep cleaning, and move-in/out services.",
        features: &["Kitchen & Bathrooms", "Dusting & Vacuuming", "Window Cleaning", "Floor Care"],
    },
    ServiceCategory {
        id: "commercial",
        title: "Commercial Cleaning",
        description: "Professional office and business cleaning services to maintain a healthy work environment.",
        features: &["Office Spaces", "Retail Stores", "Medical Facilities", "Post-Construction"],
    },
    ServiceCategory {
        id: "deep-cleaning",
        title: "Deep Cleaning",
        description: "Intensive cleaning service for homes that need extra attention or seasonal maintenance.",
        features: &["Detailed Sanitization", "Appliance Cleaning", "Baseboard & Trim", "Light Fixtures"],
    },
    ServiceCategory {
        id: "carpet-upholstery",
        title: "Carpet & Upholstery",
        description: "Professional cleaning and stain removal for carpets, rugs, and furniture using safe methods.",
        features: &["Steam Cleaning", "Stain Removal", "Odor Elimination", "Fabric Protection"],
    },
    ServiceCategory {
        id: "post-construction",
        title: "Post-Construction",
        description: "Specialized cleaning after renovations or construction work to remove dust and debris.",
        features: &["Dust Removal", "Paint Cleanup", "Window Washing", "Final Touch-ups"],
    },
    ServiceCategory {
        id: "green-cleaning",
        title: "Green Cleaning",
        description: "Environmentally conscious cleaning using only natural, non-toxic, biodegradable products.",
        features: &["Non-Toxic Products", "Child & Pet Safe", "Allergen-Free", "Sustainable Methods"],
    },
];

pub const SQUARE_FOOTAGE_BANDS: &[&str] = &[
    "0-999",
    "1000-1499",
    "1500-1999",
    "2000-2499",
    "2500-2999",
    "3000-3499",
    "3500-3999",
    "4000-4499",
    "4500-4999",
    "5000-5499",
    "5500-5999",
    "6000-6499",
    "6500-6999",
    "7000-7499",
    "7500-7999",
    "8000-8499",
    "8500-8999",
    "9000-9499",
    "9500-9999",
    "10000+",
];

pub const TIME_SLOTS: &[&str] = &[
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM",
];

pub const MIN_BEDROOMS: u8 = 0;
pub const MAX_BEDROOMS: u8 = 5;
pub const MIN_BATHROOMS: u8 = 1;
pub const MAX_BATHROOMS: u8 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    OneTime,
    Weekly,
    BiWeekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::OneTime,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Monthly => "monthly",
        }
    }

    pub fn from_id(id: &str) -> Option<Frequency> {
        Frequency::ALL.into_iter().find(|f| f.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Frequency::OneTime => "One-time",
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Every 2 weeks",
            Frequency::Monthly => "Monthly",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Frequency::OneTime => "Single cleaning session",
            Frequency::Weekly => "Every week (20% discount)",
            Frequency::BiWeekly => "Every other week (15% discount)",
            Frequency::Monthly => "Once a month (10% discount)",
        }
    }

    /// Signed percentage applied to the price, zero or negative.
    pub fn adjustment_percent(&self) -> i32 {
        match self {
            Frequency::OneTime => 0,
            Frequency::Weekly => -20,
            Frequency::BiWeekly => -15,
            Frequency::Monthly => -10,
        }
    }

    /// Short label used in booking summaries ("one time", "bi weekly").
    pub fn label(&self) -> String {
        self.id().replacen('-', " ", 1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub adjustment_percent: i32,
}

impl From<Frequency> for FrequencyOption {
    fn from(frequency: Frequency) -> Self {
        FrequencyOption {
            id: frequency.id(),
            name: frequency.name(),
            description: frequency.description(),
            adjustment_percent: frequency.adjustment_percent(),
        }
    }
}

pub fn find_service_tier(id: &str) -> Option<&'static ServiceTier> {
    SERVICE_TIERS.iter().find(|tier| tier.id == id)
}

pub fn find_add_on(id: &str) -> Option<&'static AddOn> {
    ADD_ONS.iter().find(|add_on| add_on.id == id)
}

pub fn find_service_category(id: &str) -> Option<&'static ServiceCategory> {
    SERVICE_CATEGORIES.iter().find(|category| category.id == id)
}

pub fn is_square_footage_band(band: &str) -> bool {
    SQUARE_FOOTAGE_BANDS.contains(&band)
}

pub fn is_time_slot(slot: &str) -> bool {
    TIME_SLOTS.contains(&slot)
}

/// Everything the booking pages render from static data, in one payload.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub service_tiers: &'static [ServiceTier],
    pub add_ons: &'static [AddOn],
    pub frequencies: Vec<FrequencyOption>,
    pub service_categories: &'static [ServiceCategory],
    pub square_footage_bands: &'static [&'static str],
    pub time_slots: &'static [&'static str],
}

impl Catalog {
    pub fn load() -> Self {
        Catalog {
            service_tiers: SERVICE_TIERS,
            add_ons: ADD_ONS,
            frequencies: Frequency::ALL.into_iter().map(FrequencyOption::from).collect(),
            service_categories: SERVICE_CATEGORIES,
            square_footage_bands: SQUARE_FOOTAGE_BANDS,
            time_slots: TIME_SLOTS,
        }
    }
}
