use wasm_bindgen::JsValue;

/// Helper function to use JavaScript's Math.random
pub(in crate::app) fn js_random_seed() -> u32 {
    use js_sys::Math::random;
    u32::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Browser APIs fail with arbitrary JS values, this keeps their debug text.
pub(in crate::app) fn js_error(value: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", value)
}
