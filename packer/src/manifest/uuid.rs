//! Canonical UUID form check.

/// Lengths of the hyphen-separated hexadecimal groups.
const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

/// Return `true` when `value` is an 8-4-4-4-12 hexadecimal UUID.
///
/// Surrounding whitespace is ignored and hex digits match in either case.
/// Braced, URN, and unhyphenated spellings are rejected.
///
/// # Examples
///
/// ```
/// use packy_packer::manifest::uuid::is_canonical_uuid;
///
/// assert!(is_canonical_uuid("01234567-89AB-CDEF-0123-456789ABCDEF"));
/// assert!(!is_canonical_uuid("not-a-uuid"));
/// ```
#[must_use]
pub fn is_canonical_uuid(value: &str) -> bool {
    let mut groups = value.trim().split('-');
    let groups_match = GROUP_LENGTHS.iter().all(|&len| {
        groups
            .next()
            .is_some_and(|group| group.len() == len && group.bytes().all(|b| b.is_ascii_hexdigit()))
    });
    groups_match && groups.next().is_none()
}
