pub mod io;

pub use self::io::{feature_map_from_gray, load_feature_map, save_plane_png, write_json_file};
