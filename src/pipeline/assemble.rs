//! Assemble fetched page images into a single multi-page PDF.
//!
//! Every buffer is decoded first — a page whose fetch failed, or whose bytes
//! are not a decodable image, fails the whole run before anything touches
//! disk. JPEG buffers (the format Issuu actually serves) are embedded
//! verbatim as `DCTDecode` image XObjects; anything else is re-packed as a
//! zlib-compressed raw RGB stream. Each PDF page's MediaBox matches the
//! image's pixel dimensions, one point per pixel.
//!
//! The document is serialised fully in memory and written with a single
//! `fs::write`, so a failing run never leaves a partial file behind.

use crate::config::DownloadConfig;
use crate::error::IssuuDlError;
use crate::pipeline::fetch::PageFetch;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{ColorType, DynamicImage, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the PDF landed and how big it is.
#[derive(Debug, Clone)]
pub struct AssembledPdf {
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Decode every page buffer and write `{document_name}.pdf` into the
/// configured output directory, overwriting any existing file silently.
///
/// # Errors
/// * [`IssuuDlError::EmptyDocument`] — `pages` is empty; nothing is written.
/// * [`IssuuDlError::ImageDecode`] — a page has no buffer (its fetch failed)
///   or its bytes do not decode; nothing is written.
/// * [`IssuuDlError::OutputWrite`] — the final write failed.
pub fn write_pdf(
    pages: &[PageFetch],
    document_name: &str,
    config: &DownloadConfig,
) -> Result<AssembledPdf, IssuuDlError> {
    if pages.is_empty() {
        return Err(IssuuDlError::EmptyDocument);
    }

    let path = config.output_dir.join(format!("{document_name}.pdf"));
    info!("Converting {} images to PDF: {}", pages.len(), path.display());

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for fetch in pages {
        let bytes = match fetch {
            PageFetch::Fetched { bytes, .. } => bytes,
            PageFetch::Failed { page, error } => {
                return Err(IssuuDlError::ImageDecode {
                    page: *page,
                    detail: format!("buffer is absent, fetch failed: {error}"),
                })
            }
        };
        let page_id = add_image_page(&mut doc, pages_id, fetch.page(), bytes)?;
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ])),
    );

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| IssuuDlError::PdfAssembly(e.to_string()))?;
    std::fs::write(&path, &buf).map_err(|source| IssuuDlError::OutputWrite {
        path: path.clone(),
        source,
    })?;

    Ok(AssembledPdf {
        path,
        bytes_written: buf.len() as u64,
    })
}

/// Add one page showing `bytes` as a full-page image. Returns the page's id.
fn add_image_page(
    doc: &mut Document,
    pages_id: ObjectId,
    page_num: usize,
    bytes: &[u8],
) -> Result<ObjectId, IssuuDlError> {
    let (image_stream, width, height) = image_xobject(page_num, bytes)?;
    debug!(page = page_num, width, height, "Placing page image");

    let image_id = doc.add_object(image_stream);
    let resources_id = doc.add_object(Dictionary::from_iter([(
        "XObject",
        Object::Dictionary(Dictionary::from_iter([(
            "Im0",
            Object::Reference(image_id),
        )])),
    )]));

    // Scale the unit image square up to the full MediaBox.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (i64::from(width)).into(),
                    0.into(),
                    0.into(),
                    (i64::from(height)).into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content
        .encode()
        .map_err(|e| IssuuDlError::PdfAssembly(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content_bytes));

    let page_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Reference(resources_id)),
        (
            "MediaBox",
            Object::Array(vec![
                0.into(),
                0.into(),
                (i64::from(width)).into(),
                (i64::from(height)).into(),
            ]),
        ),
    ]));
    Ok(page_id)
}

/// Decode a page buffer and build its image XObject stream.
///
/// Decoding happens unconditionally — it is the integrity check that turns
/// a truncated or mislabelled download into an error instead of a broken
/// page in the output.
fn image_xobject(page_num: usize, bytes: &[u8]) -> Result<(Stream, u32, u32), IssuuDlError> {
    let format = image::guess_format(bytes).map_err(|e| IssuuDlError::ImageDecode {
        page: page_num,
        detail: e.to_string(),
    })?;
    let img = image::load_from_memory(bytes).map_err(|e| IssuuDlError::ImageDecode {
        page: page_num,
        detail: e.to_string(),
    })?;
    let (width, height) = (img.width(), img.height());

    let stream = match format {
        // JPEG goes into the PDF as-is: PDF readers decode DCT natively,
        // and not re-encoding avoids a generation loss.
        ImageFormat::Jpeg => {
            let color_space: &[u8] = match img.color() {
                ColorType::L8 | ColorType::L16 => b"DeviceGray",
                _ => b"DeviceRGB",
            };
            let mut dict = Dictionary::new();
            dict.set("Type", Object::Name(b"XObject".to_vec()));
            dict.set("Subtype", Object::Name(b"Image".to_vec()));
            dict.set("Width", Object::Integer(i64::from(width)));
            dict.set("Height", Object::Integer(i64::from(height)));
            dict.set("ColorSpace", Object::Name(color_space.to_vec()));
            dict.set("BitsPerComponent", Object::Integer(8));
            dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
            Stream::new(dict, bytes.to_vec())
        }
        _ => flate_rgb_stream(&img, width, height)?,
    };

    Ok((stream, width, height))
}

/// Re-pack a non-JPEG image as a zlib-compressed raw RGB stream.
fn flate_rgb_stream(
    img: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Stream, IssuuDlError> {
    let rgb = img.to_rgb8();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(rgb.as_raw())
        .map_err(|e| IssuuDlError::PdfAssembly(format!("zlib compression failed: {e}")))?;
    let compressed = encoder
        .finish()
        .map_err(|e| IssuuDlError::PdfAssembly(format!("zlib compression failed: {e}")))?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    Ok(Stream::new(dict, compressed))
}
