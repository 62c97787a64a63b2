pub const GAME_SCREEN_WIDTH: i32 = 60;
pub const GAME_SCREEN_HEIGHT: i32 = 25;
pub const STATUS_SCREEN_HEIGHT: i32 = 5;

pub const STARTING_LEVEL: u32 = 1;
pub const PLAYER_START_LIVES: u32 = 3;
pub const PLAYER_START_POINTS: u32 = 0;
pub const GHOST_VALUE: u32 = 20;
pub const POINT_VALUE: u32 = 5;
pub const POWER_UP_VALUE: u32 = 10;

pub const CHASE_LENGTH: u32 = 50;
pub const SCATTER_LENGTH: u32 = 20;
pub const POWER_UP_LENGTH: u32 = 40;
pub const POWER_UP_BLINK_LENGTH: u32 = 2;
pub const CLYDE_SHY_DISTANCE: i32 = 8;

pub const TICK_MS: u64 = 190;
pub const ANIMATION_MS: u64 = 300;
pub const RESET_PAUSE_MS: u64 = 600;
pub const RESET_BLINKS: u32 = 2;

pub mod symbols {
    pub const PLAYER: char = '<';
    pub const BLINKY: char = 'B';
    pub const BLINKY_FRIGHTENED: char = 'b';
    pub const PINKY: char = 'P';
    pub const PINKY_FRIGHTENED: char = 'p';
    pub const CLYDE: char = 'C';
    pub const CLYDE_FRIGHTENED: char = 'c';
    pub const INKY: char = 'I';
    pub const INKY_FRIGHTENED: char = 'i';
    pub const GHOST_EATEN: char = 'X';
    pub const WALL: char = '#';
    pub const INVISIBLE_WALL: char = 'x';
    pub const POINT: char = '.';
    pub const POWER_UP: char = '!';
    pub const LEFT_WARP: char = 'l';
    pub const RIGHT_WARP: char = 'r';
    pub const INVISIBLE: char = ' ';
}

pub mod keys {
    pub const QUIT: char = 'Q';
    pub const PLAY: char = 'p';
    pub const UP: char = 'w';
    pub const DOWN: char = 's';
    pub const LEFT: char = 'a';
    pub const RIGHT: char = 'd';
}

pub const START_MESSAGE: &str = "\n\t\t\t\tPACMAN\
\n\
\n\t Use w,s,a,d keys to move up,down,left and right.\
\n\t Press Q to quit at any time.\
\n\
\n\t Press p to start game\
\n\t Press Q to exit\
\n\t Thank you, for playing!";

pub const GAME_OVER_MESSAGE: &str = "\n\tGAME OVER\
\n\tPress p to play again\
\n\tPress Q to exit\n";
