#![no_std]
#![no_main]

pub mod axis;
pub mod buttons;
pub mod panel;
pub mod pwm;
