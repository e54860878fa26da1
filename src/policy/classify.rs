//! Clasificación de nombres de etiqueta de ExifTool en categorías.

use super::category::FieldCategory;

const TIMESTAMP_TAGS: &[&str] = &[
    "DateTime",
    "DateTimeOriginal",
    "DateTimeDigitized",
    "CreateDate",
    "ModifyDate",
    "CreationDate",
    "ModDate",
    "MediaCreateDate",
    "MediaModifyDate",
    "TrackCreateDate",
    "TrackModifyDate",
];

const CAMERA_TAGS: &[&str] = &[
    "Make", "Model", "Lens", "LensID", "LensInfo", "LensMake", "LensModel",
];

const DEVICE_ID_TAGS: &[&str] = &[
    "SerialNumber",
    "InternalSerialNumber",
    "LensSerialNumber",
    "BodySerialNumber",
    "CameraSerialNumber",
    "ImageUniqueID",
    "OwnerName",
];

const SOFTWARE_TAGS: &[&str] = &[
    "Software",
    "ProcessingSoftware",
    "CreatorTool",
    "Producer",
    "Encoder",
    "HistorySoftwareAgent",
];

const THUMBNAIL_TAGS: &[&str] = &[
    "ThumbnailImage",
    "ThumbnailOffset",
    "ThumbnailLength",
    "PreviewImage",
    "Picture",
    "CoverArt",
];

/// Etiquetas que describen la imagen en sí (dimensiones, tiras, punteros a
/// IFD). ExifTool no puede eliminarlas sin dañar el archivo.
const STRUCTURAL_TAGS: &[&str] = &[
    "ImageWidth",
    "ImageLength",
    "ImageHeight",
    "BitsPerSample",
    "Compression",
    "PhotometricInterpretation",
    "StripOffsets",
    "SamplesPerPixel",
    "RowsPerStrip",
    "StripByteCounts",
    "XResolution",
    "YResolution",
    "ResolutionUnit",
    "PlanarConfiguration",
    "TileWidth",
    "TileLength",
    "TileOffsets",
    "TileByteCounts",
    "ExtraSamples",
    "SampleFormat",
    "ColorMap",
    "Predictor",
    "YCbCrSubSampling",
    "YCbCrPositioning",
    "ExifIFDPointer",
    "InteropIFDPointer",
    "ExifVersion",
    "FlashpixVersion",
    "ColorSpace",
    "ComponentsConfiguration",
    "PixelXDimension",
    "PixelYDimension",
];

/// `true` para etiquetas estructurales que sobreviven a cualquier limpieza.
pub fn is_structural_tag(name: &str) -> bool {
    let tag = name.rsplit_once(':').map_or(name, |(_, tag)| tag);
    STRUCTURAL_TAGS.contains(&tag)
}

/// Devuelve la categoría de una etiqueta, con o sin prefijo de grupo
/// (`GPSLatitude`, `EXIF:Make`, `XMP-dc:Creator`).
pub fn classify_tag(name: &str) -> FieldCategory {
    let (group, tag) = match name.rsplit_once(':') {
        Some((group, tag)) => (Some(group), tag),
        None => (None, name),
    };

    if let Some(group) = group {
        let group = group.to_ascii_uppercase();
        if group.starts_with("XMP") && !is_known_tag(tag) {
            return FieldCategory::Xmp;
        }
        if group.starts_with("IPTC") {
            return FieldCategory::Iptc;
        }
        if group == "GPS" {
            return FieldCategory::Gps;
        }
    }

    if tag.starts_with("GPS") {
        FieldCategory::Gps
    } else if TIMESTAMP_TAGS.contains(&tag) || tag.starts_with("SubSecTime") || tag.starts_with("OffsetTime") {
        FieldCategory::Timestamp
    } else if CAMERA_TAGS.contains(&tag) {
        FieldCategory::CameraInfo
    } else if DEVICE_ID_TAGS.contains(&tag) {
        FieldCategory::DeviceIds
    } else if SOFTWARE_TAGS.contains(&tag) {
        FieldCategory::SoftwareTags
    } else if THUMBNAIL_TAGS.contains(&tag) {
        FieldCategory::Thumbnails
    } else if tag.contains("XMP") {
        FieldCategory::Xmp
    } else if tag.contains("IPTC") {
        FieldCategory::Iptc
    } else {
        FieldCategory::Other
    }
}

fn is_known_tag(tag: &str) -> bool {
    tag.starts_with("GPS")
        || TIMESTAMP_TAGS.contains(&tag)
        || DEVICE_ID_TAGS.contains(&tag)
        || SOFTWARE_TAGS.contains(&tag)
}
