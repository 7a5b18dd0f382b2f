//! Sample catalogue for local development, loaded when `SEED_SAMPLE_DATA` is set.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::entities::{Condition, MobileStatus};
use crate::storage::{IdentityProfile, MobileChanges, MobileFilter, NewMobile, mobiles, users};

/// Owner of every sample listing.
pub const SAMPLE_SELLER_ID: &str = "sample_seller";

struct SampleListing {
    brand: &'static str,
    model: &'static str,
    image: &'static str,
    storage: &'static str,
    color: &'static str,
    condition: Condition,
    price: i64,
    description: &'static str,
    location: &'static str,
    specifications: [(&'static str, &'static str); 4],
    accessories: &'static [&'static str],
}

const SAMPLE_LISTINGS: [SampleListing; 5] = [
    SampleListing {
        brand: "Apple",
        model: "iPhone 14 Pro",
        image: "https://store.storeimages.cdn-apple.com/4982/as-images.apple.com/is/iphone-14-pro-deep-purple-select?wid=470&hei=556&fmt=png-alpha&.v=1660753293379",
        storage: "128GB",
        color: "Deep Purple",
        condition: Condition::Excellent,
        price: 85_000,
        description: "Like new iPhone 14 Pro with all original accessories. Battery health 98%.",
        location: "Mumbai",
        specifications: [
            ("ram", "6GB"),
            ("processor", "A16 Bionic"),
            ("camera", "48MP Triple Camera"),
            ("display", "6.1-inch Super Retina XDR"),
        ],
        accessories: &["Original Box", "Charger", "EarPods", "Screen Protector"],
    },
    SampleListing {
        brand: "Samsung",
        model: "Galaxy S23 Ultra",
        image: "https://images.samsung.com/is/image/samsung/p6pim/in/2302/gallery/in-galaxy-s23-ultra-s918-sm-s918bzkcins-534858085?$650_519_PNG$",
        storage: "256GB",
        color: "Phantom Black",
        condition: Condition::Excellent,
        price: 75_000,
        description: "Galaxy S23 Ultra in pristine condition. S Pen included.",
        location: "Delhi",
        specifications: [
            ("ram", "12GB"),
            ("processor", "Snapdragon 8 Gen 2"),
            ("camera", "200MP Quad Camera"),
            ("display", "6.8-inch Dynamic AMOLED 2X"),
        ],
        accessories: &["Original Box", "S Pen", "Fast Charger", "Case"],
    },
    SampleListing {
        brand: "OnePlus",
        model: "OnePlus 11",
        image: "https://oasis.opstatics.com/content/dam/oasis/page/2023/global/products/11/pc/kv/11-black-kv-pc.png",
        storage: "128GB",
        color: "Titan Black",
        condition: Condition::Good,
        price: 45_000,
        description: "Flagship performance. Minor wear on corners but fully functional.",
        location: "Bangalore",
        specifications: [
            ("ram", "8GB"),
            ("processor", "Snapdragon 8 Gen 2"),
            ("camera", "50MP Triple Camera"),
            ("display", "6.7-inch Fluid AMOLED"),
        ],
        accessories: &["Original Box", "Fast Charger"],
    },
    SampleListing {
        brand: "Xiaomi",
        model: "Mi 13 Pro",
        image: "https://i01.appmifile.com/v1/MI_18455B3E4DA706226CF7535A58E875F0267/pms_1676020415.50722073.png",
        storage: "256GB",
        color: "Ceramic White",
        condition: Condition::Excellent,
        price: 55_000,
        description: "Leica camera system with fast charging.",
        location: "Pune",
        specifications: [
            ("ram", "12GB"),
            ("processor", "Snapdragon 8 Gen 2"),
            ("camera", "50MP Leica Triple Camera"),
            ("display", "6.73-inch LTPO AMOLED"),
        ],
        accessories: &["Original Box", "120W Fast Charger", "Case"],
    },
    SampleListing {
        brand: "Google",
        model: "Pixel 7 Pro",
        image: "https://lh3.googleusercontent.com/yD6f3FWIcDgU8bJl-mHjXJ25_nG5xF-V_5O9tBqN7MBh1nKbE0_zHnYyCEI7WaKUYA",
        storage: "128GB",
        color: "Obsidian",
        condition: Condition::Excellent,
        price: 48_000,
        description: "Pure Android experience with computational photography.",
        location: "Chennai",
        specifications: [
            ("ram", "12GB"),
            ("processor", "Google Tensor G2"),
            ("camera", "50MP Triple Camera"),
            ("display", "6.7-inch LTPO OLED"),
        ],
        accessories: &["Original Box", "USB-C Cable", "Case"],
    },
];

impl SampleListing {
    fn to_new_mobile(&self) -> NewMobile {
        NewMobile {
            brand: self.brand.to_string(),
            model: self.model.to_string(),
            storage: Some(self.storage.to_string()),
            color: Some(self.color.to_string()),
            condition: self.condition,
            price: Decimal::from(self.price),
            description: Some(self.description.to_string()),
            images: vec![self.image.to_string()],
            is_new: false,
            location: Some(self.location.to_string()),
            specifications: self
                .specifications
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
            accessories: self.accessories.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Insert the sample seller and its approved listings.
///
/// Does nothing when the sample seller already has listings, so it is safe
/// to run on every start. Returns the number of listings inserted.
///
/// # Errors
///
/// Returns an error if any query fails.
pub async fn seed_sample_listings(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let seller = IdentityProfile {
        id: SAMPLE_SELLER_ID.to_string(),
        email: None,
        first_name: Some("Sample".to_string()),
        last_name: Some("Seller".to_string()),
        profile_image_url: None,
    };
    users::upsert_identity(db, &seller, false).await?;

    let existing = MobileFilter {
        seller_id: Some(SAMPLE_SELLER_ID.to_string()),
        ..MobileFilter::default()
    };
    if !mobiles::list_mobiles(db, &existing).await?.is_empty() {
        tracing::debug!("sample listings already present");
        return Ok(0);
    }

    for sample in &SAMPLE_LISTINGS {
        let listing = mobiles::create_mobile(db, SAMPLE_SELLER_ID, sample.to_new_mobile()).await?;
        mobiles::update_mobile(db, listing.id, MobileChanges::status(MobileStatus::Approved))
            .await?;
    }

    tracing::info!(count = SAMPLE_LISTINGS.len(), "seeded sample listings");
    Ok(SAMPLE_LISTINGS.len())
}
