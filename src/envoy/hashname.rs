/*
 * Copyright 2020 Google LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Length-bounded, hash-disambiguated resource names.
//!
//! All lengths are in bytes. Cuts never split a UTF-8 character, so a
//! truncated result can come out shorter than its budget but never longer.

use sha2::Digest;

/// The digest used to disambiguate truncated segments. Every generated name
/// depends on this choice; changing it renames every resource.
pub type SegmentDigest = sha2::Sha256;

/// Number of hex characters of [`SegmentDigest`] appended to a segment that
/// had to be truncated alongside siblings.
pub const SHORT_HASH_LEN: usize = 6;

const SEPARATOR: &str = "/";

/// Returns the lower-case hex digest of `input` under `D`.
pub fn content_hash<D: Digest>(input: impl AsRef<[u8]>) -> String {
    hex::encode(D::digest(input))
}

/// Joins `segments` with `/` into a name no longer than `max_len`.
///
/// The length budget is split evenly between segments. A segment that
/// does not fit its share is truncated and suffixed with a short hash of
/// the whole joined input, or with the full hash when there is only one
/// segment. If the separators still push the result over `max_len`, the
/// name collapses to the hash clipped to `max_len`.
pub fn hashname<S: AsRef<str>>(max_len: usize, segments: &[S]) -> String {
    let segments: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();

    match segments.as_slice() {
        [] => String::new(),
        [segment] if segment.len() <= max_len => (*segment).to_owned(),
        [segment] => truncate(max_len, segment, &content_hash::<SegmentDigest>(segment)),
        _ => {
            let joined = segments.join(SEPARATOR);
            let budget = max_len / segments.len();
            if segments.iter().all(|segment| segment.len() <= budget) && joined.len() <= max_len
            {
                return joined;
            }

            let hash = content_hash::<SegmentDigest>(&joined);
            let short = prefix(&hash, SHORT_HASH_LEN);
            let name = segments
                .iter()
                .map(|segment| truncate(budget, segment, short))
                .collect::<Vec<_>>()
                .join(SEPARATOR);

            if name.len() <= max_len {
                name
            } else {
                prefix(&hash, max_len).to_owned()
            }
        }
    }
}

/// Truncates `s` to at most `max_len` bytes.
///
/// `s` is returned as is when it fits. Otherwise the result is the longest
/// prefix of `s` that leaves room for `-{suffix}`, or, when not even
/// `suffix` fits, a prefix of `suffix` alone.
pub fn truncate(max_len: usize, s: &str, suffix: &str) -> String {
    if s.len() <= max_len {
        return s.to_owned();
    }

    if max_len <= suffix.len() {
        return prefix(suffix, max_len).to_owned();
    }

    format!("{}-{}", prefix(s, max_len - suffix.len() - 1), suffix)
}

/// The longest prefix of `s` that is at most `len` bytes and ends on a
/// character boundary.
fn prefix(s: &str, len: usize) -> &str {
    if len >= s.len() {
        return s;
    }

    let mut end = len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}
