use std::{
    fs::File,
    io::{BufRead, BufReader},
    num::IntErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::{DecodeError, DecodeErrorKind},
    netpbm::{
        Format, NetpbmImage,
        tokens::{Token, Tokens},
    },
};

/// Upper bound on the up-front sample allocation, so a bogus header can't reserve gigabytes.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 20;

/// Decode the ASCII Netpbm (`P2`/`P3`) file at `path`.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<NetpbmImage, DecodeError> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| DecodeError::new(path, DecodeErrorKind::Io(e)))?;
    decode_reader(path, BufReader::new(file))
}

/// Decode from any buffered reader. `path` only labels errors.
pub fn decode_reader<P, R>(path: P, reader: R) -> Result<NetpbmImage, DecodeError>
where
    P: Into<PathBuf>,
    R: BufRead,
{
    NetpbmDecoder {
        path: path.into(),
        tokens: Tokens::new(reader),
    }
    .decode()
}

/// Decode both inputs. The two files share nothing so they are read in parallel;
/// when both fail the error for `first` wins.
pub fn decode_pair<A, B>(first: A, second: B) -> Result<(NetpbmImage, NetpbmImage), DecodeError>
where
    A: AsRef<Path> + Sync,
    B: AsRef<Path> + Sync,
{
    let (a, b) = rayon::join(|| decode(&first), || decode(&second));
    Ok((a?, b?))
}

struct NetpbmDecoder<R> {
    path: PathBuf,
    tokens: Tokens<R>,
}

impl<R: BufRead> NetpbmDecoder<R> {
    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(&self.path, kind)
    }

    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        self.tokens
            .next()
            .transpose()
            .map_err(|e| self.error(DecodeErrorKind::Io(e)))
    }

    fn next_int(&mut self) -> Result<Option<i64>, DecodeError> {
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        match token.parse_int() {
            Ok(value) => Ok(Some(value)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(self.error(DecodeErrorKind::IntegerOverflow {
                        token: token.text,
                        line: token.line,
                    }))
                }
                _ => Err(self.error(DecodeErrorKind::InvalidInteger {
                    token: token.text,
                    line: token.line,
                })),
            },
        }
    }

    fn decode(mut self) -> Result<NetpbmImage, DecodeError> {
        let magic = self
            .next_token()?
            .map(|token| token.text)
            .unwrap_or_default();
        let format = Format::from_magic(&magic)
            .ok_or_else(|| self.error(DecodeErrorKind::UnsupportedFormat(magic)))?;

        let mut header = [0i64; 3];
        for field in header.iter_mut() {
            *field = self
                .next_int()?
                .ok_or_else(|| self.error(DecodeErrorKind::MalformedHeader))?;
        }
        let [width, height, max_value] = header;

        let invalid = || DecodeErrorKind::InvalidDimensions {
            width,
            height,
            max_value,
        };
        if width <= 0 || height <= 0 || max_value <= 0 {
            return Err(self.error(invalid()));
        }
        // positive i64s always fit u64, usize may still be narrower
        let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
            return Err(self.error(invalid()));
        };
        let expected = w
            .checked_mul(h)
            .and_then(|pixels| pixels.checked_mul(format.channel_count()))
            .ok_or_else(|| self.error(invalid()))?;

        log::debug!(
            "{}: {} {}x{} maxval {}, expecting {} samples",
            self.path.display(),
            format,
            w,
            h,
            max_value,
            expected
        );

        let mut samples = Vec::with_capacity(expected.min(MAX_PREALLOCATED_SAMPLES));
        while samples.len() < expected {
            match self.next_int()? {
                Some(sample) => samples.push(sample),
                None => {
                    return Err(self.error(DecodeErrorKind::TruncatedData {
                        expected,
                        found: samples.len(),
                    }));
                }
            }
        }

        log::debug!(
            "{}: decoded after {} lines",
            self.path.display(),
            self.tokens.lines_read()
        );

        Ok(NetpbmImage::new(format, w, h, max_value as u64, samples))
    }
}
