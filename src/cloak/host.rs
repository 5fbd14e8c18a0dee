use super::bounded_copy;
use super::fnv::fnv1_32;

const B26_ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Cloak a hostname while keeping its shape readable.
///
/// Pass 1 scrambles the first label through the base-26 alphabet; digits and
/// hyphens are left alone and case folds into lowercase output. Pass 2 walks
/// the whole value and remaps every digit onto another digit, so numeric
/// fragments change value but keep their positions. Labels past the first
/// dot are otherwise untouched.
///
/// There is no format precondition; arbitrary text gets the same best-effort
/// treatment.
pub fn cloak_host(host: &str) -> String {
    let mut accum = fnv1_32(host.as_bytes());
    let mut buf = bounded_copy(host).into_bytes();

    // Pass 1: first label only. The keystream advances on substitution, not
    // on skipped bytes.
    for b in buf.iter_mut() {
        if *b == b'.' {
            break;
        }

        if b.is_ascii_digit() || *b == b'-' {
            continue;
        }

        *b = B26_ALPHABET[(accum.wrapping_add(u32::from(*b)) % 26) as usize];
        // Rotate one bit so repeated letters do not collapse onto the same
        // output letter.
        accum = accum.rotate_left(1);
    }

    // Pass 2: remap every digit in the value. Unlike pass 1 the keystream
    // advances on every byte visited; deployed cloaks depend on this exact
    // sequence, so it stays.
    for b in buf.iter_mut() {
        if b.is_ascii_digit() {
            *b = b'0' + (accum.wrapping_add(u32::from(*b)) % 10) as u8;
        }

        accum = accum.rotate_left(1);
    }

    String::from_utf8_lossy(&buf).into_owned()
}
