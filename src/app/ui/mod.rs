mod controls;
mod popup;
