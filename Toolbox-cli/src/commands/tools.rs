use toolbox_domain::entities::Notice;
use toolbox_domain::tools::{self as text_tools, karaoke_search_url};

use super::{CommandError, Outcome};
use crate::cli::CodecArgs;

pub fn encode(args: &CodecArgs) -> Outcome {
    Outcome::lines(vec![text_tools::encode(args.kind, &args.text)])
}

pub fn decode(args: &CodecArgs) -> Result<Outcome, CommandError> {
    let decoded = text_tools::decode(args.kind, &args.text)?;
    Ok(Outcome::lines(vec![decoded]))
}

/// Search URL for the joined song words
pub fn karaoke(song: &[String]) -> Result<Outcome, CommandError> {
    let song = song.join(" ");
    karaoke_search_url(&song)
        .map(|url| Outcome::lines(vec![url]).with_notice(Notice::success("Search ready", song.trim())))
        .ok_or_else(|| CommandError::Usage("Please enter a song name.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbox_domain::tools::EncodingKind;

    fn args(kind: EncodingKind, text: &str) -> CodecArgs {
        CodecArgs {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_encode_decode_commands() {
        let encoded = encode(&args(EncodingKind::Base64, "hello"));
        assert_eq!(encoded.lines, vec!["aGVsbG8="]);

        let decoded = decode(&args(EncodingKind::Base64, "aGVsbG8=")).unwrap();
        assert_eq!(decoded.lines, vec!["hello"]);
    }

    #[test]
    fn test_decode_failure_notice() {
        let err = decode(&args(EncodingKind::Url, "%E0%A4%A")).unwrap_err();
        assert_eq!(err.notice().title, "Error");
    }

    #[test]
    fn test_karaoke_command() {
        let outcome = karaoke(&["Take".to_string(), "On".to_string(), "Me".to_string()]).unwrap();
        assert_eq!(
            outcome.lines,
            vec!["https://www.youtube.com/results?search_query=Take%20On%20Me%20karaoke"]
        );

        assert!(matches!(
            karaoke(&["  ".to_string()]),
            Err(CommandError::Usage(_))
        ));
    }
}
