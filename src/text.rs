use crate::MaskError;

/// Join a list of byte literals into a string
///
/// Some container formats store strings as one byte literal per character,
/// each item is decoded as UTF-8 and the results are concatenated.
pub fn decode_byte_literals<I, B>(items: I) -> Result<String, MaskError>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut output = String::new();
    for item in items {
        output.push_str(std::str::from_utf8(item.as_ref())?);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() -> Result<(), MaskError> {
        let items: [&[u8]; 6] = [b"0", b".", b"0", b"0", b"5", b"2"];
        assert_eq!(decode_byte_literals(items)?, "0.0052");
        assert_eq!(decode_byte_literals(Vec::<Vec<u8>>::new())?, "");
        assert_eq!(
            decode_byte_literals(vec!["µm".as_bytes().to_vec(), b"!".to_vec()])?,
            "µm!"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_utf8() {
        let items: [&[u8]; 2] = [b"ok", &[0xff, 0xfe]];
        assert!(matches!(
            decode_byte_literals(items),
            Err(MaskError::InvalidText(_))
        ));
    }
}
