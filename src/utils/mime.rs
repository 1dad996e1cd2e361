//! MIME type detection utilities

/// Fallback when audio arrives without a MIME type and cannot be sniffed.
pub const DEFAULT_AUDIO_MIME: &str = "audio/mp3";

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Resolve the MIME type of an audio payload: explicit value, then magic
/// numbers, then `audio/mp3`.
pub fn resolve_audio_mime(explicit: Option<&str>, bytes: &[u8]) -> String {
    if let Some(mime) = explicit.map(str::trim).filter(|m| !m.is_empty()) {
        return mime.to_string();
    }
    guess_mime_from_bytes(bytes).unwrap_or_else(|| DEFAULT_AUDIO_MIME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_mime_wins() {
        assert_eq!(resolve_audio_mime(Some("audio/ogg"), b"RIFF"), "audio/ogg");
    }

    #[test]
    fn wav_header_is_sniffed() {
        let mut wav = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
        wav.extend_from_slice(&[0u8; 16]);
        let mime = resolve_audio_mime(None, &wav);
        assert!(mime.contains("wav"), "got {mime}");
    }

    #[test]
    fn unknown_bytes_fall_back_to_mp3() {
        assert_eq!(resolve_audio_mime(Some("  "), b"\x00\x01\x02"), DEFAULT_AUDIO_MIME);
    }
}
