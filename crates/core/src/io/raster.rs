//! Flow direction raster reading
//!
//! Native GeoTIFF decode via the `tiff` crate, without a GDAL dependency.
//! Whatever the pixel type of the source image, values are folded into
//! the D8 code alphabet: {0, 1, 2, 4, 8, 16, 32, 64, 128} pass through,
//! anything else becomes the nodata sentinel.

use crate::error::{Error, Result};
use crate::raster::d8;
use crate::raster::{GeoTransform, Raster};
use std::fs::File;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

/// Read a flow direction raster from a (Geo)TIFF file.
///
/// The returned raster carries the nodata sentinel [`d8::NODATA`] and,
/// when the file has tiepoint/pixel-scale tags, its geotransform.
pub fn read_direction_raster<P: AsRef<Path>>(path: P) -> Result<Raster<u8>> {
    let path = path.as_ref();
    let load_err = |reason: String| Error::RasterLoad {
        path: path.display().to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| load_err(e.to_string()))?;
    let mut decoder = Decoder::new(file).map_err(|e| load_err(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| load_err(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    let result = decoder
        .read_image()
        .map_err(|e| load_err(format!("Cannot read image data: {}", e)))?;

    let codes: Vec<u8> = match result {
        DecodingResult::U8(buf) => buf.iter().map(|&v| fold_pixel(v)).collect(),
        DecodingResult::U16(buf) => buf.iter().map(|&v| fold_pixel(v)).collect(),
        DecodingResult::U32(buf) => buf.iter().map(|&v| fold_pixel(v)).collect(),
        DecodingResult::I8(buf) => buf.iter().map(|&v| fold_pixel(v)).collect(),
        DecodingResult::I16(buf) => buf.iter().map(|&v| fold_pixel(v)).collect(),
        DecodingResult::I32(buf) => buf.iter().map(|&v| fold_pixel(v)).collect(),
        DecodingResult::F32(buf) => buf.iter().map(|&v| fold_float(v as f64)).collect(),
        DecodingResult::F64(buf) => buf.iter().map(|&v| fold_float(v)).collect(),
        _ => return Err(load_err("Unsupported TIFF pixel format".to_string())),
    };

    if codes.len() != rows * cols {
        return Err(load_err(format!(
            "Pixel count {} does not match {}x{}",
            codes.len(),
            rows,
            cols
        )));
    }

    let mut raster = Raster::from_vec(codes, rows, cols)?;
    raster.set_nodata(Some(d8::NODATA));

    if let Ok(transform) = read_geotransform(&mut decoder) {
        raster.set_transform(transform);
    }

    Ok(raster)
}

/// Fold an integer pixel into the code alphabet.
fn fold_pixel<T: num_traits::NumCast>(value: T) -> u8 {
    match num_traits::cast::<T, i64>(value) {
        Some(v) => fold_code(v),
        None => d8::NODATA,
    }
}

fn fold_code(value: i64) -> u8 {
    match value {
        0 => 0,
        v if v > 0 && v <= 128 && d8::is_code(v as u8) => v as u8,
        _ => d8::NODATA,
    }
}

/// Fold a float pixel: only exact integral code values qualify.
fn fold_float(value: f64) -> u8 {
    if value.fract() == 0.0 && value >= 0.0 && value <= 128.0 {
        fold_code(value as i64)
    } else {
        d8::NODATA
    }
}

/// Attempt to read a GeoTransform from TIFF tags
/// (ModelPixelScaleTag 33550 + ModelTiepointTag 33922).
fn read_geotransform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
) -> Result<GeoTransform> {
    let scale = decoder
        .get_tag_f64_vec(Tag::Unknown(33550))
        .map_err(|_| Error::Other("No pixel scale tag".into()))?;

    let tiepoint = decoder
        .get_tag_f64_vec(Tag::Unknown(33922))
        .map_err(|_| Error::Other("No tiepoint tag".into()))?;

    if scale.len() >= 2 && tiepoint.len() >= 6 {
        // tiepoint: [I, J, K, X, Y, Z]; scale: [ScaleX, ScaleY, ScaleZ]
        let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
        let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
        return Ok(GeoTransform::new(origin_x, origin_y, scale[0], -scale[1]));
    }

    Err(Error::Other("Cannot determine geotransform".into()))
}
