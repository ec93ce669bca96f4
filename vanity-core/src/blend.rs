//! Head-blend buffer decoding.
//!
//! The engine answers a head-blend query by filling a caller-provided
//! 80-byte buffer with a fixed layout. [`decode`] is the only place that
//! layout is known; everything downstream works with the typed
//! [`HeadBlend`].

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Size of the engine's head-blend query buffer.
pub const HEAD_BLEND_BUFFER_LEN: usize = 80;

// Parent ids sit in u32 words 0/2/4 (shape) and 6/8/10 (skin); the parent
// flag in word 18; mix ratios are f32 at bytes 48/56/64.
const SHAPE_WORDS: [usize; 3] = [0, 2, 4];
const SKIN_WORDS: [usize; 3] = [6, 8, 10];
const HAS_PARENT_WORD: usize = 18;
const MIX_BASE_OFFSET: usize = 48;
const MIX_FLOATS: [usize; 3] = [0, 2, 4];

/// Genetic-mix parameters combining up to three parent models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeadBlend {
    pub shape_first: u32,
    pub shape_second: u32,
    pub shape_third: u32,
    pub skin_first: u32,
    pub skin_second: u32,
    pub skin_third: u32,
    pub shape_mix: f32,
    pub skin_mix: f32,
    pub third_mix: f32,
    pub has_parent: bool,
}

/// Decode the engine's fixed-layout head-blend buffer.
///
/// # Panics
///
/// Panics if `buffer` is not exactly [`HEAD_BLEND_BUFFER_LEN`] bytes. The
/// engine contract is fixed; a foreshortened buffer is a fatal integration
/// error, not a runtime condition.
#[must_use]
pub fn decode(buffer: &[u8]) -> HeadBlend {
    assert_eq!(
        buffer.len(),
        HEAD_BLEND_BUFFER_LEN,
        "head blend buffer must be exactly {HEAD_BLEND_BUFFER_LEN} bytes"
    );

    let word = |index: usize| LittleEndian::read_u32(&buffer[index * 4..index * 4 + 4]);
    let mix = |index: usize| {
        let at = MIX_BASE_OFFSET + index * 4;
        LittleEndian::read_f32(&buffer[at..at + 4])
    };

    HeadBlend {
        shape_first: word(SHAPE_WORDS[0]),
        shape_second: word(SHAPE_WORDS[1]),
        shape_third: word(SHAPE_WORDS[2]),
        skin_first: word(SKIN_WORDS[0]),
        skin_second: word(SKIN_WORDS[1]),
        skin_third: word(SKIN_WORDS[2]),
        shape_mix: mix(MIX_FLOATS[0]),
        skin_mix: mix(MIX_FLOATS[1]),
        third_mix: mix(MIX_FLOATS[2]),
        has_parent: word(HAS_PARENT_WORD) != 0,
    }
}
