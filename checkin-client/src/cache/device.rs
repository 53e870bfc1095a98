use rand::Rng;

const DEVICE_ID_PREFIX: &str = "device_";
const DEVICE_ID_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// New device identifier: `device_` followed by 9 base-36 characters
pub fn generate_device_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..DEVICE_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", DEVICE_ID_PREFIX, suffix)
}
