pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub const DEFAULT_IMAGE_EXTENSION: &str = ".png";

pub mod media {

    /// Public URL prefix for files kept on local disk.
    pub const URL_PREFIX: &str = "/media/";

    /// Sub-directory of the media root that holds design uploads.
    pub const DESIGNS_DIR: &str = "designs";
}

pub mod limits {

    pub const TITLE_MAX: usize = 100;

    pub const FULL_NAME_MAX: usize = 100;

    pub const PHONE_MAX: usize = 20;

    pub const INSTAGRAM_MAX: usize = 100;

    pub const BANK_NAME_MAX: usize = 50;

    pub const BANK_NUMBER_MAX: usize = 30;

    pub const BANK_HOLDER_MAX: usize = 100;

    pub const PRODUCT_NAME_MAX: usize = 100;

    pub const RECENT_CREATOR_DESIGNS: u64 = 5;

    pub const ADMIN_DASHBOARD_ROWS: u64 = 10;
}

pub mod session {

    pub const USER_KEY: &str = "user_id";
}
