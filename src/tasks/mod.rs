pub mod jump_loop;
