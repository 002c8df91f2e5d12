//! ASCII armor around base64 envelopes.
//!
//! ```text
//! -----BEGIN ECDSA ENCRYPTED MESSAGE-----
//! To: 1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm
//!
//! amoAAAJQkgNPNVvct8wK9yjvPM65YV2QaEu1sspfhZqw8LcE...
//! -----END ECDSA ENCRYPTED MESSAGE-----
//! ```

use crate::{Error, Result};

/// Opening boundary line.
pub const BEGIN: &str = "-----BEGIN ECDSA ENCRYPTED MESSAGE-----";

/// Closing boundary line.
pub const END: &str = "-----END ECDSA ENCRYPTED MESSAGE-----";

const RECIPIENT_HEADER: &str = "To:";

/// Contents of an armored message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Armored {
    /// Recipient address from the `To:` header, if present.
    pub recipient: Option<String>,

    /// Base64 envelope with line breaks removed.
    pub ciphertext: String,
}

/// Wrap a base64 envelope in armor, optionally naming the recipient.
pub fn encode(ciphertext: &str, recipient: Option<&str>) -> String {
    let mut out = String::with_capacity(BEGIN.len() + END.len() + ciphertext.len() + 64);
    out.push_str(BEGIN);
    out.push('\n');

    if let Some(recipient) = recipient {
        out.push_str(RECIPIENT_HEADER);
        out.push(' ');
        out.push_str(recipient);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(ciphertext);
    out.push('\n');
    out.push_str(END);
    out.push('\n');
    out
}

/// Strip the armor from `text`.
///
/// Text outside the boundary lines is ignored. Header lines run up to the
/// first blank line; without one, everything between the boundaries is
/// taken as the (possibly wrapped) base64 body.
pub fn decode(text: &str) -> Result<Armored> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .skip_while(|line| *line != BEGIN)
        .skip(1);

    let mut inner = Vec::new();
    loop {
        match lines.next() {
            Some(END) => break,
            Some(line) => inner.push(line),
            None => return Err(Error::MalformedEnvelope),
        }
    }

    let (headers, body) = match inner.iter().position(|line| line.is_empty()) {
        Some(blank) => inner.split_at(blank),
        None => (&[][..], &inner[..]),
    };

    let recipient = headers.iter().find_map(|line| {
        line.strip_prefix(RECIPIENT_HEADER)
            .map(|recipient| recipient.trim().to_owned())
    });

    let ciphertext: String = body.concat();
    if ciphertext.is_empty() {
        return Err(Error::MalformedEnvelope);
    }

    Ok(Armored {
        recipient,
        ciphertext,
    })
}

#[cfg(test)]
mod tests {
    use super::{Armored, decode, encode};
    use crate::Error;

    const ARMORED: &str = "-----BEGIN ECDSA ENCRYPTED MESSAGE-----
To: 1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm

amoAAAJQkgA=
-----END ECDSA ENCRYPTED MESSAGE-----
";

    #[test]
    fn encode_with_recipient() {
        assert_eq!(
            encode("amoAAAJQkgA=", Some("1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm")),
            ARMORED
        );
    }

    #[test]
    fn decode_with_recipient() {
        assert_eq!(
            decode(ARMORED),
            Ok(Armored {
                recipient: Some("1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm".into()),
                ciphertext: "amoAAAJQkgA=".into(),
            })
        );
    }

    #[test]
    fn decode_without_recipient() {
        let armored = encode("amoAAAJQkgA=", None);
        let decoded = decode(&armored).unwrap();
        assert_eq!(decoded.recipient, None);
        assert_eq!(decoded.ciphertext, "amoAAAJQkgA=");
    }

    #[test]
    fn decode_wrapped_and_surrounded() {
        let text = "Hi, here is the message:\r\n\r\n  -----BEGIN ECDSA ENCRYPTED MESSAGE-----\r\namoAAA\r\nJQkgA=\r\n-----END ECDSA ENCRYPTED MESSAGE-----\r\n\r\nbye";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.recipient, None);
        assert_eq!(decoded.ciphertext, "amoAAAJQkgA=");
    }

    #[test]
    fn missing_boundaries() {
        assert_eq!(decode("amoAAAJQkgA="), Err(Error::MalformedEnvelope));
        assert_eq!(
            decode("-----BEGIN ECDSA ENCRYPTED MESSAGE-----\namoAAAJQkgA=\n"),
            Err(Error::MalformedEnvelope)
        );
        assert_eq!(
            decode("-----BEGIN ECDSA ENCRYPTED MESSAGE-----\nTo: x\n\n-----END ECDSA ENCRYPTED MESSAGE-----"),
            Err(Error::MalformedEnvelope)
        );
    }
}
