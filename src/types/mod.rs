mod models;
mod section;
mod status;

pub use models::*;
pub use section::{
    FeatureItem, FeaturesSection, FooterLink, FooterSection, HOME_PAGE, HeroSection, PageDocument,
    Section,
};
pub use status::LifecycleStatus;
