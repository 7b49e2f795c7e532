// =====================================================================================
// MOCK CATALOG & TRANSACTION LOG
// =====================================================================================

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    InjectedArea, InventoryTransaction, Product, ProductCategory, TransactionType,
    TreatmentDetails, UnitType,
};

pub const MAIN_LOCATION: (&str, &str) = ("loc-main", "Main Location");
pub const WEST_LOCATION: (&str, &str) = ("loc-west", "West Clinic");

pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "prod-botox",
            "Botox Cosmetic",
            "Botox® Cosmetic",
            ProductCategory::Neurotoxin,
            420.0,
            14.0,
            UnitType::Units,
            100.0,
        ),
        product(
            "prod-dysport",
            "Dysport",
            "Dysport®",
            ProductCategory::Neurotoxin,
            380.0,
            4.5,
            UnitType::Units,
            300.0,
        ),
        product(
            "prod-juvederm-ultra",
            "Juvederm Ultra XC",
            "Juvéderm® Ultra XC",
            ProductCategory::Filler,
            280.0,
            650.0,
            UnitType::Syringe,
            1.0,
        ),
        product(
            "prod-restylane",
            "Restylane-L",
            "Restylane®-L",
            ProductCategory::Filler,
            260.0,
            600.0,
            UnitType::Syringe,
            1.0,
        ),
        product(
            "prod-sculptra",
            "Sculptra Aesthetic",
            "Sculptra® Aesthetic",
            ProductCategory::Biostimulator,
            420.0,
            950.0,
            UnitType::Vial,
            1.0,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    display_name: &str,
    category: ProductCategory,
    cost_price: f64,
    unit_price: f64,
    unit_type: UnitType,
    units_per_package: f64,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        display_name: display_name.to_string(),
        category,
        cost_price,
        unit_price,
        unit_type,
        units_per_package,
    }
}

struct TreatmentSeed {
    id: &'static str,
    days_ago: i64,
    product_id: &'static str,
    units: f64,
    location: (&'static str, &'static str),
    patient_id: &'static str,
    provider: (&'static str, &'static str),
    service: &'static str,
    areas: &'static [(&'static str, f64)],
}

const TREATMENTS: &[TreatmentSeed] = &[
    TreatmentSeed {
        id: "txn-001",
        days_ago: 2,
        product_id: "prod-botox",
        units: 25.0,
        location: MAIN_LOCATION,
        patient_id: "p-1",
        provider: ("prov-1", "Susan Lo"),
        service: "Botox Treatment",
        areas: &[("Forehead", 10.0), ("Glabella", 10.0), ("Crow's Feet", 5.0)],
    },
    TreatmentSeed {
        id: "txn-002",
        days_ago: 1,
        product_id: "prod-juvederm-ultra",
        units: 1.0,
        location: MAIN_LOCATION,
        patient_id: "p-2",
        provider: ("prov-1", "Susan Lo"),
        service: "Lip Filler",
        areas: &[("Lips", 1.0)],
    },
    TreatmentSeed {
        id: "txn-004",
        days_ago: 5,
        product_id: "prod-botox",
        units: 40.0,
        location: MAIN_LOCATION,
        patient_id: "p-3",
        provider: ("prov-2", "Dr. Emily Chen"),
        service: "Botox Treatment",
        areas: &[("Forehead", 20.0), ("Glabella", 20.0)],
    },
    TreatmentSeed {
        id: "txn-005",
        days_ago: 8,
        product_id: "prod-dysport",
        units: 60.0,
        location: WEST_LOCATION,
        patient_id: "p-4",
        provider: ("prov-2", "Dr. Emily Chen"),
        service: "Dysport Treatment",
        areas: &[("Glabella", 60.0)],
    },
    TreatmentSeed {
        id: "txn-006",
        days_ago: 12,
        product_id: "prod-restylane",
        units: 2.0,
        location: WEST_LOCATION,
        patient_id: "p-5",
        provider: ("prov-3", "Dr. Marcus Bell"),
        service: "Cheek Filler",
        areas: &[("Cheeks", 2.0)],
    },
    TreatmentSeed {
        id: "txn-007",
        days_ago: 15,
        product_id: "prod-sculptra",
        units: 1.0,
        location: MAIN_LOCATION,
        patient_id: "p-6",
        provider: ("prov-3", "Dr. Marcus Bell"),
        service: "Sculptra Treatment",
        areas: &[("Temples", 1.0)],
    },
    TreatmentSeed {
        id: "txn-008",
        days_ago: 20,
        product_id: "prod-botox",
        units: 20.0,
        location: WEST_LOCATION,
        patient_id: "p-1",
        provider: ("prov-3", "Dr. Marcus Bell"),
        service: "Botox Treatment",
        areas: &[("Forehead", 20.0)],
    },
    // Outside the default 30 day window.
    TreatmentSeed {
        id: "txn-009",
        days_ago: 45,
        product_id: "prod-botox",
        units: 30.0,
        location: MAIN_LOCATION,
        patient_id: "p-7",
        provider: ("prov-1", "Susan Lo"),
        service: "Botox Treatment",
        areas: &[("Forehead", 15.0), ("Glabella", 15.0)],
    },
];

pub fn seed_transactions(products: &[Product], now: DateTime<Utc>) -> Vec<InventoryTransaction> {
    let mut transactions: Vec<InventoryTransaction> = TREATMENTS
        .iter()
        .filter_map(|seed| {
            let product = products.iter().find(|p| p.id == seed.product_id)?;
            let unit_cost = product.unit_cost();
            Some(InventoryTransaction {
                id: seed.id.to_string(),
                transaction_type: TransactionType::TreatmentUse,
                timestamp: now - Duration::days(seed.days_ago),
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: -seed.units,
                unit_cost,
                total_cost: seed.units * unit_cost,
                location_id: seed.location.0.to_string(),
                location_name: seed.location.1.to_string(),
                patient_id: Some(seed.patient_id.to_string()),
                practitioner_id: Some(seed.provider.0.to_string()),
                practitioner_name: Some(seed.provider.1.to_string()),
                appointment_id: Some(format!("apt-{}", seed.id.trim_start_matches("txn-"))),
                treatment_details: Some(TreatmentDetails {
                    service_name: seed.service.to_string(),
                    areas_injected: seed
                        .areas
                        .iter()
                        .map(|(name, units)| InjectedArea {
                            name: name.to_string(),
                            units: *units,
                        })
                        .collect(),
                }),
            })
        })
        .collect();

    // Stock movements that never count as usage.
    transactions.push(stock_movement(
        "txn-003",
        TransactionType::Receiving,
        now - Duration::days(10),
        "Dysport",
        "prod-dysport",
        600.0,
        380.0 / 300.0,
    ));
    transactions.push(stock_movement(
        "txn-010",
        TransactionType::Adjustment,
        now - Duration::days(3),
        "Botox Cosmetic",
        "prod-botox",
        -5.0,
        4.2,
    ));

    transactions
}

fn stock_movement(
    id: &str,
    transaction_type: TransactionType,
    timestamp: DateTime<Utc>,
    product_name: &str,
    product_id: &str,
    quantity: f64,
    unit_cost: f64,
) -> InventoryTransaction {
    InventoryTransaction {
        id: id.to_string(),
        transaction_type,
        timestamp,
        product_id: product_id.to_string(),
        product_name: product_name.to_string(),
        quantity,
        unit_cost,
        total_cost: quantity.abs() * unit_cost,
        location_id: MAIN_LOCATION.0.to_string(),
        location_name: MAIN_LOCATION.1.to_string(),
        patient_id: None,
        practitioner_id: None,
        practitioner_name: None,
        appointment_id: None,
        treatment_details: None,
    }
}
