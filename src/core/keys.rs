//! Synthetic key generation
//!
//! Relation tables (attendances, student subjects) have no natural key in
//! edoo.sys. Their ECF `Id` is a name-based UUID over the ordered natural
//! key parts, so the same inputs yield the same key on every run.

use uuid::Uuid;

/// Namespace for all ECF synthetic keys
pub const ECF_KEY_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_9b3d_5e70_8c21_d4a6_0f93_b7e5);

/// Generate a deterministic key from ordered parts
///
/// Each part is length-prefixed before hashing, so `["ab", "c"]` and
/// `["a", "bc"]` produce different keys.
///
/// # Examples
///
/// ```
/// use ecf_edoosys::core::keys::generate;
///
/// let a = generate(&["4711", "10A"]);
/// let b = generate(&["4711", "10A"]);
/// assert_eq!(a, b);
/// assert_ne!(a, generate(&["10A", "4711"]));
/// ```
pub fn generate<S: AsRef<str>>(parts: &[S]) -> Uuid {
    let mut name = Vec::with_capacity(parts.iter().map(|p| p.as_ref().len() + 8).sum());
    for part in parts {
        let bytes = part.as_ref().as_bytes();
        name.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
        name.extend_from_slice(bytes);
    }
    Uuid::new_v5(&ECF_KEY_NAMESPACE, &name)
}
