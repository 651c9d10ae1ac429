pub mod wiql;
