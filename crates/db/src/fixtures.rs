use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;

use neuroboutique_core::domain::bundle::{Bundle, BundleId};
use neuroboutique_core::domain::cognitive::{BrainImpactVector, Dimension, NeuralImpact};
use neuroboutique_core::domain::offer::{DiscountType, Offer, OfferId};
use neuroboutique_core::domain::product::{Category, Product, ProductId};
use neuroboutique_core::domain::user::{NewUser, User, UserId};

/// The deterministic demo catalog the storefront boots with.
#[derive(Clone, Debug)]
pub struct DemoDataset {
    pub products: Vec<Product>,
    pub bundles: Vec<Bundle>,
    pub offers: Vec<Offer>,
    pub user: User,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub products: usize,
    pub bundles: usize,
    pub offers: usize,
    pub users: usize,
}

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    category: Category,
    image_url: &'static str,
    impact: &'static [(Dimension, f64)],
    ingredients: &'static [&'static str],
    ai_score: f64,
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: "1",
        name: "NeuroFocus Capsules",
        description: "Advanced nootropic blend for sustained attention and cognitive clarity \
                      through bacopa and lion's mane.",
        price_cents: 4_999,
        category: Category::Focus,
        image_url: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?ixlib=rb-4.0.3",
        impact: &[(Dimension::Focus, 20.0), (Dimension::Memory, 5.0)],
        ingredients: &["Bacopa Monnieri", "Lion's Mane", "Rhodiola Rosea"],
        ai_score: 94.0,
    },
    ProductSeed {
        id: "2",
        name: "Cogniva Memory Gummies",
        description: "Delicious gummies that enhance memory consolidation and recall with \
                      scientifically proven ingredients.",
        price_cents: 2_999,
        category: Category::Memory,
        image_url: "https://images.unsplash.com/photo-1584308666744-24d5c474f2ae?ixlib=rb-4.0.3",
        impact: &[(Dimension::Memory, 15.0), (Dimension::Focus, 8.0)],
        ingredients: &["Ginkgo Biloba", "Phosphatidylserine", "Omega-3"],
        ai_score: 91.0,
    },
    ProductSeed {
        id: "3",
        name: "NeuroCharge Drink Mix",
        description: "Natural energy boost with cognitive enhancement properties for sustained \
                      mental performance.",
        price_cents: 3_499,
        category: Category::Energy,
        image_url: "https://images.unsplash.com/photo-1610889556528-9a770e32642f?ixlib=rb-4.0.3",
        impact: &[(Dimension::Energy, 18.0), (Dimension::Focus, 12.0)],
        ingredients: &["Green Tea Extract", "B-Complex", "Guarana"],
        ai_score: 88.0,
    },
    ProductSeed {
        id: "4",
        name: "SleepSync Smart Mask",
        description: "AI-powered sleep optimization with light therapy and neural monitoring \
                      for deep rest.",
        price_cents: 12_999,
        category: Category::Sleep,
        image_url: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?ixlib=rb-4.0.3",
        impact: &[(Dimension::Sleep, 25.0), (Dimension::Mood, 10.0)],
        ingredients: &["LED Light Therapy", "Sleep Sensors", "Comfort Foam"],
        ai_score: 87.0,
    },
    ProductSeed {
        id: "5",
        name: "MindEase Stress Relief",
        description: "Advanced adaptogenic blend for stress reduction and mood stabilization.",
        price_cents: 3_999,
        category: Category::Mood,
        image_url: "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3",
        impact: &[(Dimension::Mood, 20.0), (Dimension::Sleep, 8.0)],
        ingredients: &["Ashwagandha", "L-Theanine", "Magnesium"],
        ai_score: 85.0,
    },
];

fn product_ids(ids: &[&str]) -> Vec<ProductId> {
    ids.iter().map(|id| ProductId((*id).to_string())).collect()
}

fn seed_product(seed: &ProductSeed, now: DateTime<Utc>) -> Product {
    let impact = seed
        .impact
        .iter()
        .fold(NeuralImpact::default(), |impact, (dimension, delta)| impact.with(*dimension, *delta));

    Product {
        image_url: Some(seed.image_url.to_string()),
        ingredients: seed.ingredients.iter().map(|name| (*name).to_string()).collect(),
        created_at: now,
        ..Product::new(seed.id, seed.name, seed.category, Decimal::new(seed.price_cents, 2))
            .with_description(seed.description)
            .with_impact(impact)
            .with_ai_score(seed.ai_score)
    }
}

fn bundles(now: DateTime<Utc>) -> Vec<Bundle> {
    vec![
        Bundle {
            id: BundleId("bundle1".to_string()),
            name: "Focus + Memory Stack".to_string(),
            description: "Perfect combination for peak cognitive performance based on AI \
                          analysis."
                .to_string(),
            original_price: Decimal::new(12_997, 2),
            bundle_price: Decimal::new(9_799, 2),
            product_ids: product_ids(&["1", "2"]),
            predicted_impact: Some(BrainImpactVector {
                memory: 18.0,
                focus: 22.0,
                sleep: 0.0,
                energy: 5.0,
                mood: 3.0,
            }),
            is_active: true,
            created_at: now,
        },
        Bundle {
            id: BundleId("bundle2".to_string()),
            name: "Complete Wellness Stack".to_string(),
            description: "Comprehensive cognitive enhancement covering all aspects of brain \
                          health."
                .to_string(),
            original_price: Decimal::new(24_495, 2),
            bundle_price: Decimal::new(18_999, 2),
            product_ids: product_ids(&["1", "2", "3", "5"]),
            predicted_impact: Some(BrainImpactVector {
                memory: 20.0,
                focus: 25.0,
                sleep: 12.0,
                energy: 18.0,
                mood: 25.0,
            }),
            is_active: true,
            created_at: now,
        },
    ]
}

fn offers(now: DateTime<Utc>) -> Vec<Offer> {
    vec![
        Offer {
            id: OfferId("flash1".to_string()),
            title: "NeuroCharge Triple Pack".to_string(),
            description: "Buy 2 Get 1 Free - Perfect for sustained energy and cognitive \
                          enhancement"
                .to_string(),
            discount_type: DiscountType::Bundle,
            discount_value: Decimal::new(3_300, 2),
            product_ids: product_ids(&["3"]),
            is_flash_deal: true,
            expires_at: Some(now + Duration::hours(2)),
            is_active: true,
            created_at: now,
        },
        Offer {
            id: OfferId("seasonal1".to_string()),
            title: "Winter Wellness Pack".to_string(),
            description: "Seasonal bundle optimized for mood and energy during colder months"
                .to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(2_500, 2),
            product_ids: product_ids(&["4", "5"]),
            is_flash_deal: false,
            expires_at: Some(now + Duration::days(30)),
            is_active: true,
            created_at: now,
        },
    ]
}

fn demo_user(demo_user_id: &str) -> User {
    User::register(
        UserId(demo_user_id.to_string()),
        NewUser {
            username: "demo".to_string(),
            email: "demo@neuroboutique.local".to_string(),
            password: SecretString::from(String::new()),
        },
    )
}

impl DemoDataset {
    /// Offer expiries are relative to `now`: the flash deal runs two hours, the seasonal
    /// pack thirty days.
    pub fn build(now: DateTime<Utc>, demo_user_id: &str) -> Self {
        Self {
            products: PRODUCTS.iter().map(|seed| seed_product(seed, now)).collect(),
            bundles: bundles(now),
            offers: offers(now),
            user: demo_user(demo_user_id),
        }
    }

    pub fn counts(&self) -> SeedResult {
        SeedResult {
            products: self.products.len(),
            bundles: self.bundles.len(),
            offers: self.offers.len(),
            users: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use neuroboutique_core::domain::cognitive::{CognitiveProfile, Dimension};

    use super::DemoDataset;

    #[test]
    fn demo_catalog_matches_storefront_launch_lineup() {
        let dataset = DemoDataset::build(Utc::now(), "demo-user");

        let ids: Vec<_> = dataset.products.iter().map(|product| product.id.0.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(dataset.products[3].impact(Dimension::Sleep), 25.0);
        assert_eq!(dataset.products[0].base_score(), 94.0);
        assert_eq!(dataset.bundles[0].savings_pct(), 25);
        assert_eq!(dataset.bundles[1].savings_pct(), 22);
        assert_eq!(dataset.user.id.0, "demo-user");
        assert_eq!(dataset.user.cognitive_profile, Some(CognitiveProfile::BASELINE));
    }

    #[test]
    fn demo_offers_are_live_at_build_time() {
        let now = Utc::now();
        let dataset = DemoDataset::build(now, "demo-user");

        assert!(dataset.offers.iter().all(|offer| offer.is_live(now)));
        assert_eq!(dataset.offers.iter().filter(|offer| offer.is_flash_deal).count(), 1);
        let counts = dataset.counts();
        assert_eq!((counts.products, counts.bundles, counts.offers), (5, 2, 2));
    }
}
