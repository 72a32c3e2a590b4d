mod assets;

pub use self::assets::Api as AssetService;
