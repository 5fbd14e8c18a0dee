use super::bounded_copy;
use super::fnv::fnv1_32;

/// Substitution table for cloaked address bytes. None of these symbols are
/// valid in IPv4 or IPv6 text, so a cloaked address cannot be mistaken for a
/// real one or collide with hex digits.
const CHAR_TABLE: &[u8; 20] = b"ghijklmnopqrstuvwxyz";

/// Cloak the trailing components of a textual IPv4 or IPv6 address.
///
/// The leading components and every `.`/`:` separator pass through
/// untouched: the first two octets of an IPv4 address, or the first half of
/// the observed colon groups of an IPv6 address, stay in the clear so abuse
/// patterns can still be grouped by network. Text without a dot or colon is
/// returned unchanged.
///
/// Output length always equals the (truncated) input length.
pub fn cloak_ip(addr: &str) -> String {
    let copy = bounded_copy(addr);

    let ipv6 = copy.contains(':');
    if !ipv6 && !copy.contains('.') {
        // Not an address; hand the copy back as-is.
        return copy;
    }

    // Count the colons up front so shortened IPv6 forms still split at the
    // midpoint of the groups that are actually present.
    let totalcount = if ipv6 {
        copy.bytes().filter(|&b| b == b':').count()
    } else {
        0
    };

    let mut accum = fnv1_32(addr.as_bytes());
    let mut buf = copy.into_bytes();
    let mut sepcount = 0;

    for b in buf.iter_mut() {
        if *b == b':' || *b == b'.' {
            sepcount += 1;
            continue;
        }

        if ipv6 && sepcount < totalcount / 2 {
            continue;
        }

        if !ipv6 && sepcount < 2 {
            continue;
        }

        *b = CHAR_TABLE[(accum.wrapping_add(u32::from(*b)) % 20) as usize];
        // Shift the keystream so repeated input bytes land on different
        // output symbols.
        accum = accum.rotate_left(1);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_keeps_the_first_two_octets() {
        assert_eq!(cloak_ip("192.168.1.1"), "192.168.t.x");
        assert_eq!(cloak_ip("10.0.0.1"), "10.0.h.g");
        assert_eq!(cloak_ip("172.16.254.3"), "172.16.ypk.g");
    }

    #[test]
    fn ipv6_keeps_the_first_half_of_the_groups() {
        assert_eq!(cloak_ip("2001:db8::1"), "2001:nsk::q");
        assert_eq!(
            cloak_ip("fe80::1ff:fe23:4567:890a"),
            "fe80::qpw:qxnq:vzru:uyqh"
        );
        assert_eq!(
            cloak_ip("2001:0db8:85a3:0000:0000:8a2e:0370:7334"),
            "2001:0db8:85a3:wkli:hzvi:posq:rixx:tstw"
        );
    }

    #[test]
    fn shortened_ipv6_still_works() {
        // Two colons observed, so cloaking starts after the first one.
        assert_eq!(cloak_ip("::1"), "::h");
    }

    #[test]
    fn non_address_text_passes_through() {
        assert_eq!(cloak_ip("no-address-here"), "no-address-here");
        assert_eq!(cloak_ip("localhost"), "localhost");
        assert_eq!(cloak_ip(""), "");
    }

    #[test]
    fn dotted_text_with_extra_groups_cloaks_from_the_third() {
        assert_eq!(cloak_ip("10.20.30.40.50"), "10.20.vh.jq.xh");
    }

    #[test]
    fn deterministic_across_calls() {
        assert_eq!(cloak_ip("192.168.1.1"), cloak_ip("192.168.1.1"));
        assert_eq!(cloak_ip("2001:db8::1"), cloak_ip("2001:db8::1"));
    }

    #[test]
    fn separators_and_length_are_preserved() {
        for input in ["192.168.1.1", "2001:db8::1", "fe80::1ff:fe23:4567:890a"] {
            let out = cloak_ip(input);
            assert_eq!(out.len(), input.len());
            for (a, b) in input.bytes().zip(out.bytes()) {
                assert_eq!(a == b'.', b == b'.');
                assert_eq!(a == b':', b == b':');
            }
        }
    }

    #[test]
    fn substituted_bytes_come_from_the_table() {
        let out = cloak_ip("203.0.113.77");
        assert!(out.starts_with("203.0."));
        for b in out["203.0.".len()..].bytes() {
            assert!(b == b'.' || CHAR_TABLE.contains(&b), "unexpected byte {b}");
        }
    }

    #[test]
    fn truncation_happens_before_classification() {
        // The only dot sits past the 49-byte bound, so the truncated copy is
        // not an address at all and passes through.
        let input = format!("{}.b.c", "a".repeat(60));
        assert_eq!(cloak_ip(&input), "a".repeat(49));
    }
}
