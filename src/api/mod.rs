pub mod blockscout;
