pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use bbox::{prelude::*, Transform, HW, TLBR, XYXY_};
pub use image::RgbImage;
pub use indexmap::{IndexMap, IndexSet};
pub use itertools::Itertools as _;
pub use label::Label;
pub use serde::{Deserialize, Deserializer, Serialize};
pub use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
pub use tracing::{error, info, info_span, warn};
