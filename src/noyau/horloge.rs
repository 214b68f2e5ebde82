// src/noyau/horloge.rs

/// Horodatage courant en millisecondes depuis l’epoch Unix.
#[cfg(target_arch = "wasm32")]
pub fn maintenant_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Horodatage courant en millisecondes depuis l’epoch Unix.
#[cfg(not(target_arch = "wasm32"))]
pub fn maintenant_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
