//! COCO annotation tables and the per-file annotation lookup.

use crate::common::*;

/// The subset of a COCO instances file the inspection tools need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSet {
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<Category>,
}

impl DataSet {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read '{}'", path.display()))?;
        let dataset = serde_json::from_str(&text)
            .with_context(|| format!("'{}' is not a valid COCO file", path.display()))?;
        Ok(dataset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    pub file_name: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    pub image_id: u64,
    /// `[x, y, w, h]` in pixels.
    pub bbox: [f64; 4],
    pub category_id: u64,
    #[serde(default)]
    pub segmentation: serde_json::Value,
    #[serde(default)]
    pub area: f64,
    #[serde(default, deserialize_with = "deserialize_iscrowd")]
    pub iscrowd: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

fn deserialize_iscrowd<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IsCrowd {
        Bool(bool),
        Int(u8),
    }

    Ok(match IsCrowd::deserialize(deserializer)? {
        IsCrowd::Bool(value) => value,
        IsCrowd::Int(value) => value != 0,
    })
}

/// The COCO tables indexed for lookups by file name.
#[derive(Debug, Clone)]
pub struct CocoIndex {
    image_ids: HashMap<String, IndexSet<u64>>,
    annotations: HashMap<u64, Vec<Annotation>>,
    categories: HashMap<u64, String>,
}

impl CocoIndex {
    pub fn new(dataset: DataSet) -> Self {
        let DataSet {
            images,
            annotations,
            categories,
        } = dataset;

        let image_ids = images
            .into_iter()
            .map(|image| (image.file_name, image.id))
            .into_group_map()
            .into_iter()
            .map(|(file_name, ids)| (file_name, ids.into_iter().collect()))
            .collect();
        let annotations = annotations
            .into_iter()
            .map(|ann| (ann.image_id, ann))
            .into_group_map();
        let categories = categories
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect();

        Self {
            image_ids,
            annotations,
            categories,
        }
    }

    /// All annotations of the images named `file_name`.
    ///
    /// A file name listed under several image ids yields the union of their
    /// annotations, each id counted once. `None` means there is nothing to
    /// draw for this file.
    pub fn lookup(&self, file_name: &str) -> Option<Vec<&Annotation>> {
        let ids = self.image_ids.get(file_name)?;
        let annotations: Vec<_> = ids
            .iter()
            .filter_map(|id| self.annotations.get(id))
            .flatten()
            .collect();
        (!annotations.is_empty()).then(|| annotations)
    }

    pub fn category_name(&self, category_id: u64) -> Result<&str> {
        self.categories
            .get(&category_id)
            .map(String::as_str)
            .ok_or_else(|| format_err!("category id {} is not defined", category_id))
    }
}
