//! Random but well-formed cellphones, for demos and tests.

use std::time::SystemTime;

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::pb::{
    Battery, Camera, Cellphone, Cpu, DdrType, Gpu, OperatingSystem, Ram, Screen, Storage,
    StorageType, Unit,
};

pub const CELLPHONE_BRANDS: &[&str] = &[
    "Apple", "Samsung", "Huawei", "Xiaomi", "OPPO", "VIVO", "Honor", "Pixel",
];
const CAMERA_BRANDS: &[&str] = &["Sony", "Leica", "Canon", "Nikon"];
const CAMERA_SPECS: &[&str] = &["12MP+20MP", "10MP+20MP", "20MP+45MP", "10MP+15MP"];
const SCREEN_RESOLUTIONS: &[&str] = &["1920x1080", "2560x1440", "1280x720", "1334x750"];
const MANUFACTURERS: &[&str] = &["Snapdragon", "Nvidia", "Intel", "Samsung", "MediaTek"];
const OPERATING_SYSTEMS: &[&str] = &[
    "Android",
    "iOS",
    "Windows Mobile",
    "ColorOS",
    "MIUI",
    "HarmonyOS",
    "OriginOS",
];
const OS_VERSIONS: &[&str] = &["Stable", "Dev", "Beta", "Insider"];

fn pick(candidates: &[&str]) -> String {
    candidates
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}

/// 2^k for k in `0..=max_exponent`.
fn power_of_two(max_exponent: u32) -> u32 {
    1 << rand::thread_rng().gen_range(0..=max_exponent)
}

/// A cellphone with a fresh id and random specs.
pub fn new_cellphone() -> Cellphone {
    let mut rng = rand::thread_rng();
    Cellphone {
        id: Uuid::new_v4().to_string(),
        brand: pick(CELLPHONE_BRANDS),
        cpu: Some(Cpu {
            manufacturer: pick(MANUFACTURERS),
            cores: power_of_two(3),
            min_ghz: rng.gen_range(1.1..2.5),
            max_ghz: rng.gen_range(2.5..5.5),
        }),
        ram: Some(Ram {
            value: power_of_two(6),
            unit: Unit::Gb.into(),
            ddr_type: [DdrType::Ddr3, DdrType::Ddr4, DdrType::Ddr5][rng.gen_range(0..3)].into(),
        }),
        gpu: Some(Gpu {
            manufacturer: pick(MANUFACTURERS),
            memory: rng.gen_range(2..25),
            memory_unit: Unit::Gb.into(),
            min_ghz: rng.gen_range(1.0..3.0),
            max_ghz: rng.gen_range(3.0..6.0),
        }),
        battery: Some(Battery {
            capacity: rng.gen_range(2000..6000),
        }),
        storage: Some(Storage {
            value: rng.gen_range(100..8092),
            unit: Unit::Gb.into(),
            storage_type: if rng.gen_bool(0.5) {
                StorageType::Ssd
            } else {
                StorageType::Hdd
            }
            .into(),
        }),
        operating_system: Some(OperatingSystem {
            name: pick(OPERATING_SYSTEMS),
            version: pick(OS_VERSIONS),
        }),
        screen: Some(Screen {
            size: rng.gen_range(4.4..7.0),
            resolution: pick(SCREEN_RESOLUTIONS),
        }),
        camera: Some(Camera {
            brand: pick(CAMERA_BRANDS),
            spec: pick(CAMERA_SPECS),
        }),
        created_at: Some(SystemTime::now().into()),
    }
}

/// A random purchase price in `[1000, 10000)`.
pub fn random_price() -> f64 {
    rand::thread_rng().gen_range(1000.0..10000.0)
}
