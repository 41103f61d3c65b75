//! The paginated ticket list: controller, pure render model and page strip.

pub mod controller;
pub mod pagination;
pub mod render;

pub use controller::TicketListController;
pub use pagination::{MAX_PAGE_BUTTONS, PageControl, PaginationModel, page_window, total_pages};
pub use render::{
    NO_DATA_MESSAGE, NO_RESULTS_MESSAGE, RenderModel, TableBody, TableRow, TicketTableRenderer,
    render_page,
};
