pub mod notification_center;
