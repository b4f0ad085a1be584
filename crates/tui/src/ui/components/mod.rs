pub mod card;
pub mod category_modal;
pub mod charts;
pub mod form;
pub mod hints;
pub mod money;
pub mod tabs;
pub mod toast;
