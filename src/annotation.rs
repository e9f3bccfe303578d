use rayon::prelude::*;
use serde_derive::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::bbox::BBox;
use crate::error::Error;

/// Annotation file stem, shared by the ground-truth and prediction files of
/// one image.
pub type ImageKey = String;

pub type AnnotationSet = BTreeMap<ImageKey, Vec<BBox>>;

#[derive(Deserialize, Debug)]
struct VocAnnotation {
    #[serde(rename = "object", default)]
    objects: Vec<VocObject>,
}

#[derive(Deserialize, Debug)]
struct VocObject {
    bndbox: Option<VocBndBox>,
}

#[derive(Deserialize, Debug)]
struct VocBndBox {
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
}

impl TryFrom<VocBndBox> for BBox {
    type Error = Error;

    fn try_from(b: VocBndBox) -> Result<Self, Self::Error> {
        BBox::ltrb(b.xmin, b.ymin, b.xmax, b.ymax)
    }
}

/// Boxes of every `<object><bndbox>` in document order.
///
/// Only the object's own box is read; `<part><bndbox>` sub-boxes are ignored.
pub fn parse_annotation(xml: &str, path: &Path) -> Result<Vec<BBox>, Error> {
    let doc: VocAnnotation = quick_xml::de::from_str(xml).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    doc.objects
        .into_iter()
        .filter_map(|o| o.bndbox)
        .map(BBox::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| Error::Annotation {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
}

pub fn read_annotation(path: &Path) -> Result<Vec<BBox>, Error> {
    let xml = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    parse_annotation(&xml, path)
}

/// Finds `*.xml` files below `root`, keyed by file stem. Symlinks are
/// followed.
pub fn discover(root: &Path) -> Result<BTreeMap<ImageKey, PathBuf>, Error> {
    let mut found: BTreeMap<ImageKey, PathBuf> = BTreeMap::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;

        if !entry.file_type().is_file() || !is_xml(entry.path()) {
            continue;
        }

        let Some(key) = entry.path().file_stem().map(|s| s.to_string_lossy().into_owned())
        else {
            continue;
        };

        if let Some(first) = found.get(&key) {
            return Err(Error::DuplicateImageKey {
                key,
                first: first.clone(),
                second: entry.into_path(),
            });
        }

        found.insert(key, entry.into_path());
    }

    Ok(found)
}

pub fn load_dir(root: &Path) -> Result<AnnotationSet, Error> {
    let files = discover(root)?;
    log::debug!("{}: {} annotation file(s)", root.display(), files.len());

    files
        .into_par_iter()
        .map(|(key, path)| read_annotation(&path).map(|boxes| (key, boxes)))
        .collect()
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("xml"))
}
