use crate::pb::{Cellphone, FilterCondition};

/// Whether `cellphone` satisfies every threshold and the brand allow-list.
///
/// Thresholds are inclusive. An empty `brands` list accepts any brand.
pub fn matches(condition: &FilterCondition, cellphone: &Cellphone) -> bool {
    cellphone.cpu_cores() >= condition.min_cpu_core
        && cellphone.ram_size() >= condition.min_ram_size
        && cellphone.storage_size() >= condition.min_storage_size
        && cellphone.battery_capacity() >= condition.min_battery_capacity
        && (condition.brands.is_empty() || condition.brands.iter().any(|b| *b == cellphone.brand))
}
