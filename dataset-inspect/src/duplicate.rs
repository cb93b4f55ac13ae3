//! Cross-category duplicate detection.
//!
//! An image may be downloaded into several category folders of the same
//! split. Each file name is reported once per split, under the exact set of
//! categories whose folders contain it.

use crate::{
    common::*,
    config::LayoutConfig,
    filenames::list_dir,
    layout::DatasetLayout,
};

/// File names found in exactly the sets at `members`, and in no other set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Set indices in ascending order.
    pub members: Vec<usize>,
    pub file_names: BTreeSet<String>,
}

/// Partition the names shared by two or more `sets` by their exact membership.
///
/// Buckets are ordered by member count, then lexicographically by member
/// indices. Empty buckets are omitted, so every name appears at most once.
pub fn membership_buckets(sets: &[BTreeSet<String>]) -> Vec<Bucket> {
    let count = sets.len();

    (2..=count)
        .flat_map(|size| (0..count).combinations(size))
        .filter_map(|members| {
            let (&first, rest) = members.split_first()?;
            let file_names: BTreeSet<String> = sets[first]
                .iter()
                .filter(|name| rest.iter().all(|&index| sets[index].contains(*name)))
                .filter(|name| {
                    (0..count)
                        .filter(|index| !members.contains(index))
                        .all(|index| !sets[index].contains(*name))
                })
                .cloned()
                .collect();
            (!file_names.is_empty()).then(|| Bucket {
                members,
                file_names,
            })
        })
        .collect()
}

/// A file name present in more than one category folder of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    pub filename: String,
    /// The copies of the file, one per category, in category order.
    pub path: Vec<PathBuf>,
    /// Category folder names, aligned with `path`.
    pub label: Vec<String>,
    /// OpenImages label IDs, aligned with `label`.
    pub id_label: Vec<String>,
}

/// Find the duplicates of one split.
///
/// `label_ids` holds the label ID of each category of `layout`. A missing
/// category folder counts as an empty one.
pub fn split_duplicates(
    dataset: &DatasetLayout,
    layout: &LayoutConfig,
    label_ids: &[String],
    split: &str,
) -> Result<Vec<DuplicateRecord>> {
    ensure!(
        label_ids.len() == layout.categories.len(),
        "expect {} label IDs, but get {}",
        layout.categories.len(),
        label_ids.len()
    );

    let dirs: Vec<PathBuf> = layout
        .category_names()
        .map(|category| dataset.category_dir(category, split))
        .collect();
    let sets: Vec<BTreeSet<String>> = dirs
        .iter()
        .map(|dir| -> Result<_> {
            if !dir.is_dir() {
                warn!("directory {} does not exist", dir.display());
                return Ok(BTreeSet::new());
            }
            Ok(list_dir(dir)?.into_iter().collect())
        })
        .collect::<Result<_>>()?;

    let records: Vec<DuplicateRecord> = membership_buckets(&sets)
        .into_iter()
        .flat_map(|bucket| {
            let Bucket {
                members,
                file_names,
            } = bucket;
            let label: Vec<String> = members
                .iter()
                .map(|&index| layout.categories[index].name.clone())
                .collect();
            let id_label: Vec<String> = members
                .iter()
                .map(|&index| label_ids[index].clone())
                .collect();
            let dirs: Vec<&PathBuf> = members.iter().map(|&index| &dirs[index]).collect();

            file_names.into_iter().map(move |filename| DuplicateRecord {
                path: dirs.iter().map(|dir| dir.join(&filename)).collect(),
                label: label.clone(),
                id_label: id_label.clone(),
                filename,
            })
        })
        .collect();

    info!("found {} duplicated images in split {}", records.len(), split);
    Ok(records)
}

/// Find the duplicates of every split, concatenated in split order.
pub fn find_duplicates(
    dataset: &DatasetLayout,
    layout: &LayoutConfig,
    label_ids: &[String],
) -> Result<Vec<DuplicateRecord>> {
    let mut records = vec![];
    for split in &layout.splits {
        records.extend(split_duplicates(dataset, layout, label_ids, split)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn ids() -> Vec<String> {
        vec!["/m/01yrx".into(), "/m/0bt9lr".into(), "/m/01g317".into()]
    }

    #[test]
    fn buckets_follow_exact_membership() {
        let sets = [
            set(&["x.jpg", "y.jpg", "a.jpg"]),
            set(&["x.jpg", "y.jpg", "b.jpg"]),
            set(&["x.jpg", "z.jpg"]),
        ];
        let buckets = membership_buckets(&sets);
        assert_eq!(
            buckets,
            [
                Bucket {
                    members: vec![0, 1],
                    file_names: set(&["y.jpg"]),
                },
                Bucket {
                    members: vec![0, 1, 2],
                    file_names: set(&["x.jpg"]),
                },
            ]
        );
    }

    #[test]
    fn shared_names_are_reported_once() {
        let sets = [
            set(&["1", "2", "3", "4", "5"]),
            set(&["2", "3", "6"]),
            set(&["3", "4", "6", "7"]),
            set(&["5", "6", "7", "8"]),
        ];
        let buckets = membership_buckets(&sets);

        let names: Vec<&String> = buckets
            .iter()
            .flat_map(|bucket| &bucket.file_names)
            .collect();
        let unique: BTreeSet<&String> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len());

        // a name belongs to the buckets iff it is in at least two sets
        for name in ["1", "2", "3", "4", "5", "6", "7", "8"] {
            let in_sets = sets.iter().filter(|set| set.contains(name)).count();
            assert_eq!(unique.contains(&name.to_string()), in_sets >= 2, "{}", name);
        }
        assert!(buckets.iter().all(|bucket| bucket.members.len() >= 2));
    }

    #[test]
    fn disjoint_sets_have_no_buckets() {
        let sets = [set(&["a"]), set(&["b"]), set(&[])];
        assert!(membership_buckets(&sets).is_empty());
        assert!(membership_buckets(&[]).is_empty());
    }

    #[test]
    fn split_with_triple_duplicate_only() {
        let root = tempfile::tempdir().unwrap();
        let dataset = DatasetLayout::new(root.path(), "oi", "raw/1");
        let layout = LayoutConfig::default();

        for category in ["cat", "dog", "person"] {
            let dir = dataset.category_dir(category, "train");
            fs::create_dir_all(dir.join("labels")).unwrap();
            fs::write(dir.join("x.jpg"), b"").unwrap();
        }
        fs::write(dataset.category_dir("cat", "train").join("y.jpg"), b"").unwrap();

        let records = split_duplicates(&dataset, &layout, &ids(), "train").unwrap();
        assert_eq!(
            records,
            [DuplicateRecord {
                filename: "x.jpg".into(),
                path: vec![
                    dataset.category_dir("cat", "train").join("x.jpg"),
                    dataset.category_dir("dog", "train").join("x.jpg"),
                    dataset.category_dir("person", "train").join("x.jpg"),
                ],
                label: vec!["cat".into(), "dog".into(), "person".into()],
                id_label: ids(),
            }]
        );
    }

    #[test]
    fn missing_folder_counts_as_empty() {
        let root = tempfile::tempdir().unwrap();
        let dataset = DatasetLayout::new(root.path(), "oi", "raw/1");
        let layout = LayoutConfig::default();

        for category in ["dog", "person"] {
            let dir = dataset.category_dir(category, "test");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("y.jpg"), b"").unwrap();
        }

        let records = find_duplicates(&dataset, &layout, &ids()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "y.jpg");
        assert_eq!(records[0].label, ["dog", "person"]);
        assert_eq!(records[0].id_label, ["/m/0bt9lr", "/m/01g317"]);
    }
}
