use crate::error::{Result, TafError};

#[derive(Debug, Clone, Copy)]
enum AdaptiveFilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}

impl AdaptiveFilterType {
    fn apply_filter(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            AdaptiveFilterType::None => x,
            AdaptiveFilterType::Sub => x.wrapping_sub(a),
            AdaptiveFilterType::Up => x.wrapping_sub(b),
            AdaptiveFilterType::Average => x.wrapping_sub(average(a, b)),
            AdaptiveFilterType::Paeth => x.wrapping_sub(paeth_predictor(a, b, c)),
        }
    }

    fn revert_filter(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            AdaptiveFilterType::None => x,
            AdaptiveFilterType::Sub => x.wrapping_add(a),
            AdaptiveFilterType::Up => x.wrapping_add(b),
            AdaptiveFilterType::Average => x.wrapping_add(average(a, b)),
            AdaptiveFilterType::Paeth => x.wrapping_add(paeth_predictor(a, b, c)),
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            AdaptiveFilterType::None => 0,
            AdaptiveFilterType::Sub => 1,
            AdaptiveFilterType::Up => 2,
            AdaptiveFilterType::Average => 3,
            AdaptiveFilterType::Paeth => 4,
        }
    }

    fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(AdaptiveFilterType::None),
            1 => Ok(AdaptiveFilterType::Sub),
            2 => Ok(AdaptiveFilterType::Up),
            3 => Ok(AdaptiveFilterType::Average),
            4 => Ok(AdaptiveFilterType::Paeth),
            _ => Err(TafError::Png(format!("Unrecognized filter type {byte}"))),
        }
    }
}

fn average(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

const FILTERS: [AdaptiveFilterType; 5] = [
    AdaptiveFilterType::None,
    AdaptiveFilterType::Sub,
    AdaptiveFilterType::Up,
    AdaptiveFilterType::Average,
    AdaptiveFilterType::Paeth,
];

/// Neighbouring bytes of `scanline[col]`: left (a), above (b), above-left (c).
fn neighbours(scanline: &[u8], previous: Option<&[u8]>, col: usize, bpp: usize) -> (u8, u8, u8) {
    let a = col.checked_sub(bpp).map_or(0, |i| scanline[i]);
    let b = previous.map_or(0, |prev| prev[col]);
    let c = match (previous, col.checked_sub(bpp)) {
        (Some(prev), Some(i)) => prev[i],
        _ => 0,
    };

    (a, b, c)
}

/// Picks, per scanline, the filter with the smallest sum of output bytes and
/// prefixes the filtered line with its type byte.
pub fn filter_scanlines(scanlines: &[Vec<u8>], bytes_per_pixel: usize) -> Vec<Vec<u8>> {
    let mut filtered_scanlines: Vec<Vec<u8>> = Vec::with_capacity(scanlines.len());

    for (row, scanline) in scanlines.iter().enumerate() {
        let previous = row.checked_sub(1).map(|r| scanlines[r].as_slice());

        let best = FILTERS
            .iter()
            .map(|filter| {
                let mut filtered = Vec::with_capacity(scanline.len() + 1);
                filtered.push(filter.to_byte());
                for (col, &x) in scanline.iter().enumerate() {
                    let (a, b, c) = neighbours(scanline, previous, col, bytes_per_pixel);
                    filtered.push(filter.apply_filter(x, a, b, c));
                }

                filtered
            })
            .min_by_key(|filtered| filtered[1..].iter().map(|x| *x as u32).sum::<u32>());

        if let Some(best) = best {
            filtered_scanlines.push(best);
        }
    }

    filtered_scanlines
}

pub fn remove_scanlines_filter(
    scanlines: &[Vec<u8>],
    bytes_per_pixel: usize,
) -> Result<Vec<Vec<u8>>> {
    let mut unfiltered_scanlines: Vec<Vec<u8>> = Vec::with_capacity(scanlines.len());

    for scanline in scanlines {
        let (&filter_byte, data) = scanline
            .split_first()
            .ok_or_else(|| TafError::Png("empty scanline".to_string()))?;
        let filter_type = AdaptiveFilterType::from_byte(filter_byte)?;
        let mut unfiltered: Vec<u8> = Vec::with_capacity(data.len());

        for (col, &x) in data.iter().enumerate() {
            let previous = unfiltered_scanlines.last().map(|prev| prev.as_slice());
            let (a, b, c) = neighbours(&unfiltered, previous, col, bytes_per_pixel);
            unfiltered.push(filter_type.revert_filter(x, a, b, c));
        }

        unfiltered_scanlines.push(unfiltered);
    }

    Ok(unfiltered_scanlines)
}
