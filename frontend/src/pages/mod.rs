pub mod promo_wheel;
