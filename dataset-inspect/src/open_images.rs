//! OpenImages box annotations and the label ID mapping.

use crate::common::*;

/// A row of an OpenImages box annotation CSV. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenImagesRow {
    #[serde(rename = "ImageID")]
    pub image_id: String,
    #[serde(rename = "LabelName")]
    pub label_name: String,
    #[serde(rename = "XMin")]
    pub x_min: f64,
    #[serde(rename = "YMin")]
    pub y_min: f64,
    #[serde(rename = "XMax")]
    pub x_max: f64,
    #[serde(rename = "YMax")]
    pub y_max: f64,
}

impl OpenImagesRow {
    /// The box in ratio units, labelled with the raw label ID.
    pub fn ratio_label(&self) -> Label<XYXY_<f64>, String> {
        let rect = XYXY_ {
            x1: self.x_min,
            y1: self.y_min,
            x2: self.x_max,
            y2: self.y_max,
        };
        Label::new(rect, self.label_name.clone())
    }
}

/// Box annotations grouped by `ImageID`.
#[derive(Debug, Clone, Default)]
pub struct OpenImagesIndex {
    rows: HashMap<String, Vec<OpenImagesRow>>,
}

impl OpenImagesIndex {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let rows: Vec<OpenImagesRow> = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("unable to open '{}'", path.display()))?
            .deserialize()
            .collect::<Result<_, _>>()
            .with_context(|| format!("'{}' is not a valid OpenImages CSV", path.display()))?;
        Ok(Self::from_rows(rows))
    }

    pub fn from_rows(rows: impl IntoIterator<Item = OpenImagesRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| (row.image_id.clone(), row))
            .into_group_map();
        Self { rows }
    }

    /// The rows of `image_id`, if it has any.
    pub fn lookup(&self, image_id: &str) -> Option<&[OpenImagesRow]> {
        self.rows.get(image_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The header-less `ID,label` mapping, e.g. `/m/01yrx,Cat`.
#[derive(Debug, Clone, Default)]
pub struct LabelMapping {
    labels: IndexMap<String, String>,
}

impl LabelMapping {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let pairs: Vec<(String, String)> = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("unable to open '{}'", path.display()))?
            .deserialize()
            .collect::<Result<_, _>>()
            .with_context(|| format!("'{}' is not a valid label mapping", path.display()))?;
        Ok(Self::from_pairs(pairs))
    }

    /// Build from `(ID, label)` pairs. The first entry of a repeated ID wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut labels = IndexMap::new();
        for (id, label) in pairs {
            labels.entry(id).or_insert(label);
        }
        Self { labels }
    }

    /// The human label of `id`.
    pub fn label(&self, id: &str) -> Result<&str> {
        self.labels
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| format_err!("label ID '{}' is not in the label mapping", id))
    }

    /// The ID of the first entry labelled `label`.
    pub fn id_of(&self, label: &str) -> Result<&str> {
        self.labels
            .iter()
            .find(|(_, name)| *name == label)
            .map(|(id, _)| id.as_str())
            .ok_or_else(|| format_err!("label '{}' is not in the label mapping", label))
    }
}

/// Scale `rows` to pixel units of an image of `size` and resolve their labels.
///
/// An unknown label ID is an error. Corner order is kept as given.
pub fn pixel_labels(
    rows: &[OpenImagesRow],
    size: &HW<f64>,
    mapping: &LabelMapping,
) -> Result<Vec<Label<XYXY_<f64>, String>>> {
    let transform = Transform::ratio_to_pixel(size)?;

    rows.iter()
        .map(|row| -> Result<_> {
            let name = mapping.label(&row.label_name)?;
            let pixel = &transform * &row.ratio_label();
            Ok(Label::new(pixel.rect, name.to_owned()))
        })
        .collect()
}
