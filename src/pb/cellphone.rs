//! The catalog record and its nested specification messages.

use prost_types::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Unit {
    Unspecified = 0,
    Mb = 1,
    Gb = 2,
    Tb = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum StorageType {
    Unspecified = 0,
    Ssd = 1,
    Hdd = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DdrType {
    Unspecified = 0,
    Ddr3 = 1,
    Ddr4 = 2,
    Ddr5 = 3,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Cpu {
    #[prost(string, tag = "1")]
    pub manufacturer: String,
    #[prost(uint32, tag = "2")]
    pub cores: u32,
    #[prost(double, tag = "3")]
    pub min_ghz: f64,
    #[prost(double, tag = "4")]
    pub max_ghz: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Gpu {
    #[prost(string, tag = "1")]
    pub manufacturer: String,
    #[prost(uint32, tag = "2")]
    pub memory: u32,
    #[prost(enumeration = "Unit", tag = "3")]
    pub memory_unit: i32,
    #[prost(double, tag = "4")]
    pub min_ghz: f64,
    #[prost(double, tag = "5")]
    pub max_ghz: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Ram {
    #[prost(uint32, tag = "1")]
    pub value: u32,
    #[prost(enumeration = "Unit", tag = "2")]
    pub unit: i32,
    #[prost(enumeration = "DdrType", tag = "3")]
    pub ddr_type: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Storage {
    #[prost(uint32, tag = "1")]
    pub value: u32,
    #[prost(enumeration = "Unit", tag = "2")]
    pub unit: i32,
    #[prost(enumeration = "StorageType", tag = "3")]
    pub storage_type: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Battery {
    /// Capacity in mAh.
    #[prost(uint32, tag = "1")]
    pub capacity: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Screen {
    /// Diagonal in inches.
    #[prost(double, tag = "1")]
    pub size: f64,
    #[prost(string, tag = "2")]
    pub resolution: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Camera {
    #[prost(string, tag = "1")]
    pub brand: String,
    #[prost(string, tag = "2")]
    pub spec: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OperatingSystem {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub version: String,
}

/// A cataloged cellphone.
///
/// `id` must be a hyphenated UUID once stored. Nested specs are optional on
/// the wire; an absent spec counts as zero for search thresholds.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Cellphone {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub brand: String,
    #[prost(message, optional, tag = "3")]
    pub cpu: Option<Cpu>,
    #[prost(message, optional, tag = "4")]
    pub ram: Option<Ram>,
    #[prost(message, optional, tag = "5")]
    pub gpu: Option<Gpu>,
    #[prost(message, optional, tag = "6")]
    pub battery: Option<Battery>,
    #[prost(message, optional, tag = "7")]
    pub storage: Option<Storage>,
    #[prost(message, optional, tag = "8")]
    pub operating_system: Option<OperatingSystem>,
    #[prost(message, optional, tag = "9")]
    pub screen: Option<Screen>,
    #[prost(message, optional, tag = "10")]
    pub camera: Option<Camera>,
    #[prost(message, optional, tag = "11")]
    pub created_at: Option<Timestamp>,
}

impl Cellphone {
    pub fn cpu_cores(&self) -> u32 {
        self.cpu.as_ref().map_or(0, |cpu| cpu.cores)
    }

    pub fn ram_size(&self) -> u32 {
        self.ram.as_ref().map_or(0, |ram| ram.value)
    }

    pub fn storage_size(&self) -> u32 {
        self.storage.as_ref().map_or(0, |storage| storage.value)
    }

    pub fn battery_capacity(&self) -> u32 {
        self.battery.as_ref().map_or(0, |battery| battery.capacity)
    }
}
